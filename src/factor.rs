//! Defines the `Factor` type.
//!
//! A `Factor` is a non-negative potential over some set of `Variable`s. A Markov network is a
//! collection of `Factor`s; see Koller & Friedman Chapter 4.

use util::{Result, AndreyError};
use variable::{Variable, Assignment, all_assignments};

use ndarray::prelude as nd;
use itertools::Itertools;

/// Alias f64 ndarray::Array as Table
pub type Table = nd::ArrayD<f64>;


#[derive(Clone, Debug)]
pub enum Factor {
    /// The empty, identity `Factor` with no scope. This type exists for dealing with arithmetic
    /// operations of `Factor`s
    Identity,

    /// A `Factor` over some scope of variables, represented as a table of potential values with
    /// one dimension per scope `Variable`.
    TableFactor {
        /// The scope of the `Factor`
        scope: Vec<Variable>,

        /// The values of the `Factor` table.
        table: Table
    }
}


impl Factor {

    /// Get the identity factor
    pub fn identity() -> Self {
        Factor::Identity
    }


    /// Create a new `Factor` over the given scope.
    ///
    /// # Args
    /// * `scope`: the `Variable`s the `Factor` ranges over, in table-dimension order
    /// * `table`: the potential values; one dimension per `Variable`, sized by its cardinality
    ///
    /// # Errors
    /// * `AndreyError::InvalidScope` if the scope is empty
    /// * `AndreyError::DuplicateVariable` if the scope mentions a `Variable` twice
    /// * `AndreyError::NegativePotential` if the table contains a negative value
    /// * `AndreyError::General` if the table shape does not match the scope
    pub fn new(scope: Vec<Variable>, table: Table) -> Result<Self> {
        if scope.len() == 0 {
            return Err(AndreyError::InvalidScope);
        } else if scope.iter().unique().count() != scope.len() {
            return Err(AndreyError::DuplicateVariable);
        } else if scope.len() != table.ndim() {
            return Err(
                AndreyError::General(
                    String::from("Invalid arguments. Cardinality of scope must match number of table dimensions")
                )
            );
        }

        for (v, t) in scope.iter().map(|&v| v.cardinality()).zip(table.shape().iter()) {
            if v != *t {
                return Err(
                    AndreyError::General(
                        String::from("Invalid arguments. Dimensions do not match")
                    )
                );
            }
        }

        // potentials may not have negative values
        if table.iter().any(|&v| v < 0.0) {
            return Err(AndreyError::NegativePotential);
        }

        Ok(Factor::TableFactor { scope, table })
    }


    /// Check if the `Factor` is the identity `Factor`
    pub fn is_identity(&self) -> bool {
        match self {
            &Factor::Identity => true,
            _ => false
        }
    }


    /// Retrieve the scope of the `Factor`.
    ///
    /// # Note
    /// This method returns a clone of the `Factor`'s scope. `Variable`s are lightweight and
    /// therefore this is an acceptable overhead
    pub fn scope(&self) -> Vec<Variable> {
        match self {
            &Factor::Identity => vec![],
            &Factor::TableFactor { ref scope, .. } => scope.clone()
        }
    }


    /// Retrieve the value for a complete assignment over the scope of this `Factor`
    ///
    /// This operation is defined only on non-identity `Factor`s.
    ///
    /// # Args
    /// * `assignment`: a full assignment to the scope of the `Factor`. The assignment's scope
    ///   may be a superset of the `Factor`s scope.
    ///
    /// # Returns
    /// the value of the assignment, or an error.
    ///
    /// # Errors
    /// * `AndreyError::General` if the `Factor` is the identity
    /// * `AndreyError::IncompleteAssignment`, if assignment is not a complete assignment to the
    ///   scope of the `Factor`
    pub fn value(&self, assignment: &Assignment) -> Result<f64> {
        match self {
            &Factor::Identity => {
                Err(AndreyError::General(String::from("The identity factor has no value")))
            },
            &Factor::TableFactor { ref scope, ref table } => {
                let idxs: Vec<Option<&usize>> = scope.iter().map(|v| assignment.get(v)).collect();
                if idxs.iter().any(|&v| v.is_none()) {
                    return Err(AndreyError::IncompleteAssignment);
                }

                let idxs: Vec<usize> = idxs.iter().map(|&v| *(v.unwrap())).collect();
                Ok(table[nd::IxDyn(&idxs)])
            }
        }
    }


    /// Product of this `Factor` and another `Factor` that have intersecting scope.
    ///
    /// Defined in Koller & Friedman Section 4.2.1
    ///
    /// # Args
    /// * `other`: the `Factor` to multiply with.
    ///
    /// # Returns
    /// A new `Factor` of scope union(self.scope(), other.scope())
    ///
    /// # Errors
    /// * `AndreyError::InvalidScope`, if intersection(self.scope(), other.scope()) = []
    pub fn product(&self, other: &Self) -> Result<Self> {
        // Factor::Identity is the multiplicative identity
        if let &Factor::Identity = self {
            return Ok(other.clone());
        } else if let &Factor::Identity = other {
            return Ok(self.clone());
        }

        // If we get here, we have two non-trivial (i.e. non-identity) factors.
        // We are computing a new factor Psi(X, Y, Z) = phi1(X, Y) * phi2(Y, Z).
        // See Koller & Friedman Definition 4.2
        let my_scope = self.scope();
        let other_scope = other.scope();

        let count = my_scope.len() + other_scope.len();

        // compute the set union(X, Y, Z)
        let new_scope: Vec<Variable> = my_scope.into_iter()
                                               .chain(other.scope())
                                               .unique()
                                               .collect();

        if new_scope.len() == count {
            // there was no intersection, so the factor product is undefined
            return Err(AndreyError::InvalidScope);
        }

        let new_shape: Vec<usize> = new_scope.iter().map(|&v| v.cardinality()).collect();

        // Allocate space for new table
        let mut tbl = nd::Array::ones(new_shape).into_dyn();

        for assn in all_assignments(&new_scope) {
            // For each assignment, multiply the values in each and store the result in the
            // new table
            //
            // Unwrapping here is safe because a failed lookup should be impossible if
            // invariants are maintained
            let phi1_val = self.value(&assn).unwrap();
            let phi2_val = other.value(&assn).unwrap();

            let idx: Vec<usize> = new_scope.iter().map(|v| *assn.get(&v).unwrap()).collect();
            tbl[nd::IxDyn(&idx)] = phi1_val * phi2_val;
        }

        Factor::new(new_scope, tbl)
    }


    /// Reduce the `Factor` to over the given partial assignment
    ///
    /// Defined in Koller & Friedman 4.2.3
    ///
    /// # Args
    /// * `assignment`: a partial assignment to the `Factor`
    ///
    /// # Returns
    /// A new `Factor` over the unassigned `Variable`s of the scope. Reducing over a complete
    /// assignment yields the identity `Factor`.
    pub fn reduce(&self, assignment: &Assignment) -> Self {
        match self {
            &Factor::Identity => Factor::Identity,
            &Factor::TableFactor { ref scope, ref table } => {
                // reduce table based on assignment
                let mut view = table.view();
                let mut new_shape: Vec<usize> = Vec::new();
                let mut new_scope: Vec<Variable> = Vec::new();

                for (i, &v) in scope.iter().enumerate() {
                    if let Some(&val) = assignment.get(&v) {
                        view.subview_inplace(nd::Axis(i), val);
                    } else {
                        new_shape.push(table.len_of(nd::Axis(i)));
                        new_scope.push(v);
                    }
                }

                if new_scope.len() == 0 {
                    // complete assignment
                    Factor::Identity
                } else if new_scope.len() == scope.len() {
                    // empty assignment (relative to scope)
                    self.clone()
                } else {
                    Factor::new(
                        new_scope,
                        view.to_owned().into_shape(new_shape).expect("reduce encountered error")
                    ).expect(
                        "reduce encountered unexpected error"
                    )
                }
            }
        }
    }


    /// Normalize the `Factor` so that its values sum to one.
    ///
    /// # Returns
    /// a new `Factor` over the same scope whose table is a distribution
    ///
    /// # Errors
    /// * `AndreyError::DivideByZero` if the values of the `Factor` sum to zero
    pub fn normalize(&self) -> Result<Self> {
        match self {
            &Factor::Identity => Ok(Factor::Identity),
            &Factor::TableFactor { ref scope, ref table } => {
                let z = table.scalar_sum();
                if z <= 0.0 {
                    return Err(AndreyError::DivideByZero);
                }

                Factor::new(scope.clone(), table / z)
            }
        }
    }

}

// Unit tests
#[cfg(test)]
mod tests {
    use super::*;
    use std;

    #[test]
    fn identity() {
        let f = Factor::identity();
        let f2 = Factor::identity();

        assert!(f.is_identity());
        assert!(f2.is_identity());
    }

    #[test]
    fn table_factor() {
        let vars = vec![ Variable::binary(), Variable::discrete(5), Variable::discrete(3) ];
        let mut table = Table::ones(vec![2, 5, 3]);
        table[[1, 1, 1].as_ref()] = 5.;

        // assert table holds correct values
        let f = Factor::new(vars.clone(), table).unwrap();

        assert!(! f.is_identity());
        for (x, y, z) in iproduct!(0..2, 0..5, 0..3) {
            let mut assn = Assignment::new();
            assn.set(&vars[0], x);
            assn.set(&vars[1], y);
            assn.set(&vars[2], z);

            let val = f.value(&assn).unwrap();
            if x == 1 && y == 1 && z == 1 {
                assert_eq!(5., val);
            } else {
                assert_eq!(1., val);
            }
        }
    }

    #[test]
    fn table_factor_errs() {
        // empty scope
        let vars = vec![];
        let table = Table::ones(vec![2, 5, 3]);
        let f = Factor::new(vars, table);
        assert!(f.is_err());
        match f.expect_err("missing error") {
            AndreyError::InvalidScope => assert!(true),
            _ => panic!("wrong error type")
        };

        // duplicate variable in scope
        let v = Variable::binary();
        let table = Table::ones(vec![2, 2]);
        let f = Factor::new(vec![ v, v ], table);
        assert!(f.is_err());
        match f.expect_err("missing error") {
            AndreyError::DuplicateVariable => assert!(true),
            _ => panic!("wrong error type")
        };

        // mismatched number of dimensions
        let vars = vec![ Variable::binary(), Variable::binary() ];
        let table = Table::ones(vec![2, 2, 2]);
        let f = Factor::new(vars.clone(), table);
        assert!(f.is_err());
        match f.expect_err("missing error") {
            AndreyError::General(_) => assert!(true),
            _ => panic!("wrong error type")
        };

        // wrong cardinality
        let table = Table::ones(vec![2, 3]);
        let f = Factor::new(vars.clone(), table);
        assert!(f.is_err());
        match f.expect_err("missing error") {
            AndreyError::General(_) => assert!(true),
            _ => panic!("wrong error type")
        };

        // negative potential
        let mut table = Table::ones(vec![2, 2]);
        table[[0, 1].as_ref()] = -1.;
        let f = Factor::new(vars.clone(), table);
        assert!(f.is_err());
        match f.expect_err("missing error") {
            AndreyError::NegativePotential => assert!(true),
            _ => panic!("wrong error type")
        };
    }

    #[test]
    fn value() {
        let vars = vec![ Variable::binary(), Variable::binary() ];
        let mut table = Table::ones(vec![2, 2]);

        for (i, (x, y)) in (0..2).zip(0..2).enumerate() {
            table[[x, y].as_ref()] = i as f64;
        }

        let f = Factor::new(vars.clone(), table).expect("Unexpected error");

        // verify behavior on precise assignment
        for (i, (x, y)) in (0..2).zip(0..2).enumerate() {
            let mut assn = Assignment::new();
            assn.set(&vars[0], x);
            assn.set(&vars[1], y);

            assert_eq!(i as f64, f.value(&assn).expect("unexpected error"));
        }

        // verify behavior on full assignment with out of scope values
        let v3 = Variable::binary();

        for (i, (x, y)) in (0..2).zip(0..2).enumerate() {
            let mut assn = Assignment::new();
            assn.set(&vars[0], x);
            assn.set(&vars[1], y);
            assn.set(&v3, 0);

            assert_eq!(i as f64, f.value(&assn).expect("unexpected error"));
        }

        // verify behavior on incomplete assignment
        let mut assn = Assignment::new();
        assn.set(&vars[0], 0);
        assn.set(&v3, 0);

        let res = f.value(&assn);
        assert!(res.is_err());
        match res.expect_err("") {
            AndreyError::IncompleteAssignment => assert!(true),
            _ => panic!("incorrect error")
        };
    }

    #[test]
    /// Example taken from Koller & Friedman Figure 4.3
    fn product() {
        let a = Variable::discrete(3);
        let b = Variable::binary();
        let c = Variable::binary();

        let tbl1 = nd::Array::from_shape_vec(
            (3, 2),
            vec![ 0.5, 0.8, 0.1, 0., 0.3, 0.9 ]
        ).expect("Unexpected error").into_dyn();
        let phi1 = Factor::new(vec![ a, b ], tbl1).expect("Unexpected error");

        let tbl2 = nd::Array::from_shape_vec(
            (2, 2),
            vec![ 0.5, 0.7, 0.1, 0.2 ]
        ).expect("Unexpected error").into_dyn();
        let phi2 = Factor::new(vec![ b, c ], tbl2).expect("Unexpected error");

        let phi = phi1.product(&phi2).expect("Unexpected error");

        let expected = nd::Array::from_shape_vec(
            (3, 2, 2),
            vec![ 0.25, 0.35, 0.08, 0.16, 0.05, 0.07, 0., 0., 0.15, 0.21, 0.09, 0.18 ]
        ).expect("Unexpected error").into_dyn();

        for (x, y, z) in iproduct!(0..3, 0..2, 0..2) {
            let mut assn = Assignment::new();
            assn.set(&a, x);
            assn.set(&b, y);
            assn.set(&c, z);

            let idx = vec![x, y, z];
            let val = expected[nd::IxDyn(&idx)];

            assert!(
                (val - phi.value(&assn).unwrap()).abs() < std::f64::EPSILON
            );
        }
    }

    #[test]
    fn prod_identity() {
        let a = Variable::discrete(3);
        let b = Variable::binary();

        let tbl1 = nd::Array::from_shape_vec(
            (3, 2),
            vec![ 0.5, 0.8, 0.1, 0., 0.3, 0.9 ]
        ).expect("Unexpected error").into_dyn();
        let phi1 = Factor::new(vec![ a, b ], tbl1.clone()).expect("Unexpected error");

        let phi2 = Factor::identity();
        let phi = phi1.product(&phi2).expect("Unexpected error");

        assert_eq!(phi1.scope(), phi.scope());

        for (x, y) in iproduct!(0..3, 0..2) {
            let mut assn = Assignment::new();
            assn.set(&a, x);
            assn.set(&b, y);

            let idx = vec![x, y];
            let val = tbl1[nd::IxDyn(&idx)];
            assert!(
                (val - phi.value(&assn).unwrap()).abs() < std::f64::EPSILON
            );
        }

        let phi = phi2.product(&phi1).expect("Unexpected error");
        assert_eq!(phi1.scope(), phi.scope());

        for (x, y) in iproduct!(0..3, 0..2) {
            let mut assn = Assignment::new();
            assn.set(&a, x);
            assn.set(&b, y);

            let idx = vec![x, y];
            let val = tbl1[nd::IxDyn(&idx)];
            assert!(
                (val - phi.value(&assn).unwrap()).abs() < std::f64::EPSILON
            );
        }
    }

    #[test]
    fn prod_err() {
        let a = Variable::discrete(3);
        let b = Variable::binary();
        let c = Variable::binary();

        let tbl1 = nd::Array::from_shape_vec(
            (3, 2),
            vec![ 0.5, 0.8, 0.1, 0., 0.3, 0.9 ]
        ).expect("Unexpected error").into_dyn();
        let phi1 = Factor::new(vec![ a, b ], tbl1).expect("Unexpected error");

        let tbl2 = nd::Array::from_shape_vec(
            (2,),
            vec![ 0.5, 0.7 ]
        ).expect("Unexpected error").into_dyn();
        let phi2 = Factor::new(vec![ c ], tbl2).expect("Unexpected error");

        let phi = phi1.product(&phi2);
        match phi {
            Ok(_) => panic!("Failed to produce error on invalid scope"),
            Err(e) => {
                match e {
                    AndreyError::InvalidScope => assert!(true),
                    _ => panic!("Failed to produce correct error on invalid scope")
                };
            }
        };
    }

    #[test]
    /// Example take from Koller & Friedman Figure 4.5
    fn reduce_simple() {
        let a = Variable::discrete(3);
        let b = Variable::binary();
        let c = Variable::binary();

        let table = nd::Array::from_shape_vec(
            (3, 2, 2),
            vec![ 0.25, 0.35, 0.08, 0.16, 0.05, 0.07, 0., 0., 0.15, 0.21, 0.09, 0.18 ]
        ).expect("Unexpected error").into_dyn();

        let phi = Factor::new(vec![a, b, c], table).expect("Unexpected error");

        let mut assn = Assignment::new();
        assn.set(&c, 0);

        let expected = nd::Array::from_shape_vec(
            (3, 2),
            vec![ 0.25, 0.08, 0.05, 0., 0.15, 0.09 ]
        ).expect("Unexpected error").into_dyn();

        let reduced = phi.reduce(&assn);
        assert_eq!(vec![a, b], reduced.scope());
        for (x, y) in iproduct!(0..3, 0..2) {
            let mut assn = Assignment::new();
            assn.set(&a, x);
            assn.set(&b, y);

            let idx = [x, y];
            assert_eq!(expected[nd::IxDyn(&idx)], reduced.value(&assn).expect("unexpected error"));
        }
    }

    #[test]
    fn reduce_empty() {
        let a = Variable::binary();
        let b = Variable::binary();
        let c = Variable::binary();

        let table = array![[ 1., 0. ], [ 0., 1. ]].into_dyn();
        let phi = Factor::new(vec![a, b], table.clone()).expect("Unexpected error");

        let mut assn = Assignment::new();
        assn.set(&c, 1);

        let reduced = phi.reduce(&assn);
        assert_eq!(vec![a, b], reduced.scope());
        for (x, y) in iproduct!(0..2, 0..2) {
            let mut asn = Assignment::new();
            asn.set(&a, x);
            asn.set(&b, y);

            let idx = [x, y];
            assert_eq!(table[nd::IxDyn(&idx)], reduced.value(&asn).expect("Unexpected error"));
        }
    }

    #[test]
    fn reduce_full() {
        let a = Variable::binary();
        let b = Variable::binary();
        let c = Variable::binary();

        let table = array![[ 1., 0. ], [ 0., 1. ]].into_dyn();
        let phi = Factor::new(vec![a, b], table.clone()).expect("Unexpected error");

        let mut assn = Assignment::new();
        assn.set(&a, 0);
        assn.set(&b, 0);
        assn.set(&c, 1);

        let reduced = phi.reduce(&assn);
        assert!(reduced.is_identity());
    }

    #[test]
    fn reduce_multiple() {
        let a = Variable::discrete(3);
        let b = Variable::binary();
        let c = Variable::binary();

        let table = nd::Array::from_shape_vec(
            (3, 2, 2),
            vec![ 0.25, 0.35, 0.08, 0.16, 0.05, 0.07, 0., 0., 0.15, 0.21, 0.09, 0.18 ]
        ).expect("Unexpected error").into_dyn();

        let phi = Factor::new(vec![a, b, c], table).expect("Unexpected error");

        let mut assn = Assignment::new();
        assn.set(&c, 0);
        assn.set(&a, 2);

        let expected = array![0.15, 0.09].into_dyn();

        let reduced = phi.reduce(&assn);
        assert_eq!(vec![b], reduced.scope());
        for x in 0..2 {
            let mut assn = Assignment::new();
            assn.set(&b, x);

            let idx = [x];
            assert_eq!(expected[nd::IxDyn(&idx)], reduced.value(&assn).expect("unexpected error"));
        }
    }

    #[test]
    fn normalize() {
        let a = Variable::binary();
        let b = Variable::binary();

        let table = array![[ 3., 1. ], [ 2., 2. ]].into_dyn();
        let phi = Factor::new(vec![a, b], table).expect("Unexpected error");

        let normalized = phi.normalize().expect("Unexpected error");
        assert_eq!(phi.scope(), normalized.scope());

        let mut assn = Assignment::new();
        assn.set(&a, 0);
        assn.set(&b, 0);
        assert!(
            (0.375 - normalized.value(&assn).unwrap()).abs() < std::f64::EPSILON
        );

        let total: f64 = all_assignments(&normalized.scope())
            .map(|assn| normalized.value(&assn).unwrap())
            .sum();
        assert!((1.0 - total).abs() < std::f64::EPSILON);
    }

    #[test]
    fn normalize_zero_mass() {
        let a = Variable::binary();

        let table = array![ 0., 0. ].into_dyn();
        let phi = Factor::new(vec![a], table).expect("Unexpected error");

        let res = phi.normalize();
        assert!(res.is_err());
        match res.expect_err("missing error") {
            AndreyError::DivideByZero => assert!(true),
            _ => panic!("wrong error type")
        };
    }

    #[test]
    fn normalize_identity() {
        let phi = Factor::identity();
        assert!(phi.normalize().expect("Unexpected error").is_identity());
    }
}
