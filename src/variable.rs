//! Defines the `Variable` and `Assignment` types.
//!
//! A `Variable` represents a discrete random variable in a Probabilistic Graphical Model. A
//! `Variable` is a lightweight token; any human-readable name lives in the model that contains
//! it.

use itertools::Itertools;

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of unique `Variable` ids
static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A discrete random variable that may take the values ```0..cardinality```.
///
/// `Variable`s are interned: every call to a constructor yields a distinct `Variable`, and
/// copies of it compare equal. `Variable`s are cheap to copy and may be used as map keys.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Variable {

    /// The unique id of the `Variable`
    id: usize,

    /// The number of values the `Variable` may take
    cardinality: usize

}

impl Variable {

    /// Construct a new binary `Variable`
    pub fn binary() -> Variable {
        Variable::discrete(2)
    }

    /// Construct a new discrete `Variable` that may take ```cardinality``` values
    pub fn discrete(cardinality: usize) -> Variable {
        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
        Variable { id, cardinality }
    }

    /// Get the number of values the `Variable` may take
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// Get the unique id of the `Variable`
    pub fn id(&self) -> usize {
        self.id
    }

}

impl fmt::Display for Variable {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "X{}", self.id)
    }

}


/// A partial assignment of values to `Variable`s.
///
/// Values are indices into the range ```0..cardinality``` of the assigned `Variable`.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {

    /// The assigned values
    assignment: HashMap<Variable, usize>

}

impl Assignment {

    /// Construct a new, empty `Assignment`
    pub fn new() -> Assignment {
        Assignment { assignment: HashMap::new() }
    }

    /// Set the value of ```var```, replacing any previous value
    pub fn set(&mut self, var: &Variable, value: usize) {
        self.assignment.insert(*var, value);
    }

    /// Get the value of ```var```, if it is assigned
    pub fn get(&self, var: &Variable) -> Option<&usize> {
        self.assignment.get(var)
    }

    /// Remove the value of ```var```, if it is assigned
    pub fn unset(&mut self, var: &Variable) {
        self.assignment.remove(var);
    }

    /// Check whether ```var``` is assigned
    pub fn contains(&self, var: &Variable) -> bool {
        self.assignment.contains_key(var)
    }

    /// Get the number of assigned `Variable`s
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    /// Check whether no `Variable`s are assigned
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// Iterate over the assigned `Variable`s and their values
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &usize)> {
        self.assignment.iter()
    }

    /// Check whether this `Assignment` agrees with ```other``` on every `Variable` assigned in
    /// both.
    pub fn consistent_with(&self, other: &Assignment) -> bool {
        self.assignment.iter().all(|(v, val)| {
            match other.get(v) {
                Some(o) => o == val,
                None => true
            }
        })
    }

}


/// Enumerate every complete `Assignment` to the given scope.
///
/// # Args
/// * `scope`: the `Variable`s to assign
///
/// # Returns
/// an `Iterator` over the complete assignments to ```scope```. The value of the last `Variable`
/// in the scope varies fastest, so a single-`Variable` scope yields its values in increasing
/// order.
pub fn all_assignments<'a>(scope: &'a [Variable]) -> impl Iterator<Item = Assignment> + 'a {
    scope.iter()
         .map(|v| 0..v.cardinality())
         .multi_cartesian_product()
         .map(move |values| {
             let mut assn = Assignment::new();
             for (v, value) in scope.iter().zip(values) {
                 assn.set(v, value);
             }
             assn
         })
}
