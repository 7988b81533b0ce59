//! Defines a Gibbs `Sampler` over a `MarkovNet`.
//!
//! Implementation of Koller & Friedman Algorithm 12.4

use factor::Factor;
use model::MarkovNet;
use super::{Sampler, SampleTable};
use util::{Result, AndreyError};
use variable::{all_assignments, Assignment, Variable};

use rand::Rng;
use rand::distributions::{Range, IndependentSample};


/// Defines how a `GibbsSampler` chooses the state of the chain before the first sweep.
pub enum InitialSample {

    /// Draw each unobserved `Variable` independently and uniformly from its values
    Random,

    /// Start the chain from a caller-provided complete `Assignment`
    Fixed(Assignment)

}


/// A systematic-scan Gibbs sampler.
///
/// Each sweep of the chain visits every unobserved `Variable` in vertex order and redraws it
/// from its full conditional distribution given the rest of the chain state. Evidence
/// `Variable`s stay clamped to their observed values. Sequential samples are correlated; `run`
/// applies burn-in and thinning to reduce the correlation of the recorded rows.
pub struct GibbsSampler<'a, R: Rng> {

    /// The model the chain explores
    model: &'a MarkovNet,

    /// The `Variable`s of the model, in vertex order
    variables: Vec<Variable>,

    /// The observed `Variable`s, clamped in every sample
    evidence: Assignment,

    /// The current state of the chain
    sample: Assignment,

    /// The source of randomness of the chain
    rng: R

}


impl<'a, R: Rng> GibbsSampler<'a, R> {

    /// Construct a new `GibbsSampler` over the given `MarkovNet`.
    ///
    /// # Args
    /// * `model`: the `MarkovNet` to sample from
    /// * `evidence`: a partial `Assignment` of observed `Variable`s, clamped in every sample
    /// * `init`: how to choose the state of the chain before the first sweep
    /// * `rng`: the source of randomness of the chain. Pass a seeded generator for
    ///   reproducible runs.
    ///
    /// # Errors
    /// * `AndreyError::UnknownVariable` if the evidence mentions a `Variable` outside the model
    /// * `AndreyError::InvalidArgument` if an evidence or initial value is out of range, or if
    ///   a model `Variable` has no values to draw
    /// * `AndreyError::IncompleteAssignment` if a `Fixed` initial state misses a `Variable`
    /// * `AndreyError::InconsistentEvidence` if a `Fixed` initial state contradicts the evidence
    pub fn new(
        model: &'a MarkovNet,
        evidence: &Assignment,
        init: InitialSample,
        mut rng: R
    ) -> Result<GibbsSampler<'a, R>> {
        //////////////////////////////////////////////////////////////
        // 1) validate the model variables and the evidence
        let variables = model.variables();

        for v in variables.iter() {
            if v.cardinality() == 0 {
                return Err(AndreyError::InvalidArgument(
                    format!("{} has no values to sample", v)
                ));
            }
        }

        for (v, &val) in evidence.iter() {
            if ! model.contains(v) {
                return Err(AndreyError::UnknownVariable(v.to_string()));
            }

            if val >= v.cardinality() {
                return Err(AndreyError::InvalidArgument(
                    format!("evidence value {} is out of range for {}", val, v)
                ));
            }
        }

        //////////////////////////////////////////////////////////////
        // 2) choose the state of the chain before the first sweep
        let sample = match init {
            InitialSample::Fixed(assignment) => {
                for v in variables.iter() {
                    match assignment.get(v) {
                        None => return Err(AndreyError::IncompleteAssignment),
                        Some(&val) if val >= v.cardinality() => {
                            return Err(AndreyError::InvalidArgument(
                                format!("initial value {} is out of range for {}", val, v)
                            ));
                        },
                        Some(_) => ()
                    };
                }

                if ! assignment.consistent_with(evidence) {
                    return Err(AndreyError::InconsistentEvidence);
                }

                assignment
            },
            InitialSample::Random => {
                let mut sample = Assignment::new();
                for v in variables.iter() {
                    if let Some(&val) = evidence.get(v) {
                        sample.set(v, val);
                    } else {
                        let between = Range::new(0, v.cardinality());
                        sample.set(v, between.ind_sample(&mut rng));
                    }
                }

                sample
            }
        };

        Ok(GibbsSampler { model, variables, evidence: evidence.clone(), sample, rng })
    }


    /// Run the chain and record samples into a `SampleTable`.
    ///
    /// # Args
    /// * `nsamples`: the number of samples to record; must be at least 1
    /// * `burn_in`: the number of initial sweeps to discard before recording
    /// * `thinning`: the number of sweeps to discard before each recorded sample
    ///
    /// # Returns
    /// a `SampleTable` with one column per model `Variable`, named and in vertex order, and one
    /// row per recorded sample. Evidence columns are constant.
    ///
    /// # Errors
    /// * `AndreyError::InvalidArgument` if ```nsamples``` is zero
    /// * `AndreyError::DivideByZero` if a full conditional of the chain has no mass
    pub fn run(&mut self, nsamples: usize, burn_in: usize, thinning: usize) -> Result<SampleTable> {
        if nsamples < 1 {
            return Err(AndreyError::InvalidArgument(String::from("nsamples must be at least 1")));
        }

        //////////////////////////////////////////////////////////////
        // 1) burn in the chain
        for _ in 0..burn_in {
            self.sweep()?;
        }

        //////////////////////////////////////////////////////////////
        // 2) record nsamples rows, discarding thinning sweeps before each
        // every model variable is named, so the lookups cannot fail
        let names: Vec<String> = self.variables
                                     .iter()
                                     .map(|v| self.model.lookup_name(v).unwrap().clone())
                                     .collect();
        let mut table = SampleTable::new(names);

        for _ in 0..nsamples {
            for _ in 0..thinning {
                self.sweep()?;
            }
            self.sweep()?;

            // the chain state is complete, so the lookups cannot fail
            let row: Vec<usize> = self.variables
                                      .iter()
                                      .map(|v| *self.sample.get(v).unwrap())
                                      .collect();
            table.push_row(&row);
        }

        Ok(table)
    }


    /// Run one sweep of the chain: redraw every unobserved `Variable` in vertex order from its
    /// full conditional distribution.
    fn sweep(&mut self) -> Result<()> {
        for i in 0..self.variables.len() {
            let v = self.variables[i];
            if self.evidence.contains(&v) {
                continue;
            }

            self.update(v)?;
        }

        Ok(())
    }


    /// Redraw a single `Variable` from P(v | every other `Variable` of the chain state).
    fn update(&mut self, v: Variable) -> Result<()> {
        //////////////////////////////////////////////////////////////
        // 1) unset v from the current sample
        self.sample.unset(&v);

        //////////////////////////////////////////////////////////////
        // 2) compute P(v | variables - {v}) from the factors that mention v; the other factors
        //    reduce to constants that normalization would cancel anyway
        let factors = self.model.factors();
        // every model variable is indexed
        let indices = self.model.factors_with(&v).unwrap();

        let conditional = indices.iter()
                                 .map(|&i| factors[i].reduce(&self.sample))
                                 .fold(Ok(Factor::Identity), |acc, f1| acc.and_then(|f2| f1.product(&f2)))?;

        let scope = vec![v];
        let weights = all_assignments(&scope)
            .map(|a| conditional.value(&a))
            .collect::<Result<Vec<f64>>>()?;

        //////////////////////////////////////////////////////////////
        // 3) draw v from the conditional and restore it in the sample
        let val = draw_categorical(&mut self.rng, &weights)?;
        self.sample.set(&v, val);

        Ok(())
    }

}


impl<'a, R: Rng> Sampler for GibbsSampler<'a, R> {

    /// Run one sweep of the chain and return the resulting state.
    fn sample(&mut self) -> Result<Assignment> {
        self.sweep()?;
        Ok(self.sample.clone())
    }

}


/// Draw an index from the categorical distribution proportional to ```weights```.
fn draw_categorical<R: Rng>(rng: &mut R, weights: &[f64]) -> Result<usize> {
    let total: f64 = weights.iter().sum();

    // a conditional with zero (or NaN) mass leaves nothing to draw from
    if ! (total > 0.0) {
        return Err(AndreyError::DivideByZero);
    }

    let between = Range::new(0.0, total);
    let draw = between.ind_sample(rng);

    let mut upper = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        upper = upper + w;
        if draw < upper {
            return Ok(i);
        }
    }

    // rounding while accumulating can leave the draw above the final bound; fall back to the
    // last value with any mass
    Ok(weights.iter().rposition(|&w| w > 0.0).unwrap())
}
