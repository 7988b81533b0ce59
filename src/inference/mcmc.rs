//! Defines a `ConditionalInferenceEngine` for Markov-Chain Monte-Carlo methods.
//!
//! Implementation of MCMC Inference for Conditional Queries described in Koller & Friedman
//! 12.3.5.2

use factor::{Factor, Table};
use samplers::Sampler;
use super::ConditionalInferenceEngine;
use util::{AndreyError, Result};
use variable::Variable;

use ndarray::prelude as nd;
use std::collections::HashSet;

/// A `ConditionalInferenceEngine` for Markov-Chain Monte-Carlo `Sampler`s over a `MarkovNet`.
///
/// The engine estimates ```P(variables | evidence)``` by counting the states the chain visits.
/// The evidence is fixed by the `Sampler` itself.
pub struct McmcEngine<'a, S: 'a + Sampler> {

    /// The sampler driving the chain
    sampler: &'a mut S,

    /// The number of samples to draw per query
    samples: usize

}

impl<'a, S: Sampler> McmcEngine<'a, S> {

    /// Construct a new `McmcEngine`.
    ///
    /// # Args
    /// * `sampler`: the `Sampler` driving the chain
    /// * `burnin`: the number of samples to discard before the first query
    /// * `samples`: the number of samples to draw per query; must be at least 1
    ///
    /// # Errors
    /// * `AndreyError::InvalidArgument` if ```samples``` is zero
    /// * any error raised by the `Sampler` while burning in
    pub fn new(sampler: &'a mut S, burnin: usize, samples: usize) -> Result<Self> {
        if samples < 1 {
            return Err(AndreyError::InvalidArgument(String::from("samples must be at least 1")));
        }

        // let the sampler burn in
        for _ in 0..burnin {
            sampler.sample()?;
        }

        Ok(McmcEngine { sampler, samples })
    }

}

impl<'a, S: 'a + Sampler> ConditionalInferenceEngine for McmcEngine<'a, S> {

    fn infer(&mut self, variables: &HashSet<Variable>) -> Result<Factor> {
        // initialize the factor table. We must assign an order to variables.
        let scope: Vec<Variable> = variables.iter().cloned().collect();
        let shape: Vec<usize> = scope.iter().map(|v| v.cardinality()).collect();
        let mut table = Table::zeros(shape);

        // sample away...
        for i in 0..self.samples {
            let a = self.sampler.sample()?;

            let idx: Vec<Option<&usize>> = scope.iter().map(|v| a.get(v)).collect();

            // on the first iteration, verify the assignment covers the scope
            if i == 0 {
                if idx.iter().any(|v| v.is_none()) {
                    return Err(AndreyError::InvalidScope);
                }
            }

            let idx: Vec<usize> = idx.iter().map(|v| v.unwrap()).cloned().collect();

            table[nd::IxDyn(&idx)] += 1.0;
        }

        let factor = Factor::new(scope, table)?;
        factor.normalize()
    }

}
