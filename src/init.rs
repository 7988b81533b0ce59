//! Module containing initialization routines for the factors of a model.

use factor::Factor;
use util::{AndreyError, Result};
use variable::Variable;

use ndarray::prelude as nd;
use ndarray_rand::RandomExt;
use rand::distributions::Range;

use std::collections::HashSet;

/// Defines possible ways to initialize a `Factor`s potential table.
pub enum Initialization<'a> {
    /// A uniform distribution over all possibilities
    Uniform,

    /// Randomly initialize the weights of the table.
    Random,

    /// Initialize the table as a Binomial distribution with parameter ```p```.
    /// Note that this `Initialization` is valid only for a single binary `Variable`.
    Binomial(f64),

    /// Initialize the table as a Multinomial distribution with parameters ```p_0, p_1...```.
    /// Note that this `Initialization` is valid only for a single `Variable`.
    Multinomial(&'a [f64]),

    /// User defined potential table
    Table(Factor)
}


impl<'a> Initialization<'a> {

    /// Construct a factor, initialized based on ```self```
    ///
    /// # Args
    /// * `scope`: a set of `Variable`s over which to build the `Factor`
    ///
    /// # Returns
    /// a `Factor`, initialized according to ```self```. The order of the `Variable`s in the
    /// resulting `Factor` is undefined unless ```self``` is a ```Table```.
    pub fn build_factor(self, scope: HashSet<Variable>) -> Result<Factor> {
        ///////////////////////////////////////////////////////////////////////////////
        // Trivial cases

        if scope.is_empty() {
            return Err(AndreyError::InvalidScope);
        }

        // if this is a user defined factor, it just needs to be verified and returned
        if let Initialization::Table(f) = self {
            let s = f.scope();
            if s.iter().all(|v| scope.contains(v)) && s.len() == scope.len() {
                return Ok(f);
            } else {
                return Err(AndreyError::InvalidScope);
            }
        }

        ///////////////////////////////////////////////////////////////////////////////
        // Check for errors
        if scope.len() == 1 {
            let var = scope.iter().next().unwrap();

            match self {

                // A binomial distribution on a non-binary variable
                Initialization::Binomial(_) if var.cardinality() != 2 => {
                    return Err(AndreyError::InvalidInitialization);
                },

                // A multinomial distribution with an incorrect number of parameters
                Initialization::Multinomial(ps) if ps.len() != var.cardinality() => {
                    return Err(AndreyError::InvalidInitialization);
                },

                _ => ()
            }
        } else {
            match self {

                // A binomial/multinomial on a non-unit scope
                Initialization::Binomial(_) | Initialization::Multinomial(_) => {
                    return Err(AndreyError::InvalidInitialization);
                },

                _ => ()
            }
        }

        ///////////////////////////////////////////////////////////////////////////////
        // now, build factor
        let shape: Vec<usize> = scope.iter().map(|v| v.cardinality()).collect();

        let tbl = match self {
            Initialization::Uniform => {
                // normalizing constant is just the number of elements
                let z: usize = shape.iter().product();
                let val = 1. / (z as f64);
                nd::Array::from_elem(shape, val).into_dyn()
            },
            Initialization::Random => {
                let mut tbl = nd::Array::random(shape, Range::new(1.0, 100.0));
                let z = tbl.scalar_sum();
                tbl.mapv_inplace(|e| e / z);
                tbl.into_dyn()
            },
            Initialization::Binomial(p) => {
                array![p, (1.0 - p)].into_dyn()
            },
            Initialization::Multinomial(p) => {
                nd::Array::from_iter(p.iter().map(|&x| x)).into_dyn()
            },
            Initialization::Table(_) => panic!("unreachable")
        };

        Factor::new(scope.into_iter().collect(), tbl)
    }
}
