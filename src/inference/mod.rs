//! Defines the interface to inference engines

use factor::Factor;
use variable::Variable;
use super::Result;

use std::collections::HashSet;

mod mcmc;

pub use self::mcmc::McmcEngine;


/// A `ConditionalInferenceEngine` is capable of answering Conditional Probability Queries of the form:
///     ```P(Y | E = e)```
///
/// `ConditionalInferenceEngine`s are stateful and must take the evidence `e` as an argument to whatever
/// construction mechanism they employ.
pub trait ConditionalInferenceEngine {

    /// Infer the joint distribution ```P(variables | evidence)```
    fn infer(&mut self, variables: &HashSet<Variable>) -> Result<Factor>;

}
