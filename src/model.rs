//! Defines the `MarkovNet`, a Markovian (undirected) graphical model representing the
//! factorization of a probability distribution P as a product of non-negative `Factor`s.

use factor::Factor;
use graph::UndirectedGraph;
use init::Initialization;
use util::{Result, AndreyError};
use variable::{all_assignments, Assignment, Variable};

use bidir_map::BidirMap;
use indexmap::IndexMap;

use std::collections::HashSet;

/// Represents a Markov Network - an Undirected Probabilistic Graphical Model.
///
/// # Representation
/// A `MarkovNet` maintains both views of the model described in Koller & Friedman Chapter 4:
/// the collection of `Factor`s defining the Gibbs distribution, and the `UndirectedGraph` over
/// the `Variable`s that those `Factor`s induce. Each `Variable` maps to one vertex of the graph,
/// and the `Variable`s in the scope of each `Factor` form a clique.
pub struct MarkovNet {

    /// The `Factor`s that comprise the `MarkovNet`
    factors: Vec<Factor>,

    /// The graph induced by the scopes of ```factors```
    graph: UndirectedGraph,

    /// For each `Variable`, the indices of the `Factor`s whose scope mentions it. The order of
    /// insertion defines the vertex order of ```graph```.
    factor_index: IndexMap<Variable, Vec<usize>>,

    /// The `Variable`s that comprise the `MarkovNet` and their names.
    names: BidirMap<Variable, String>

}


impl MarkovNet {

    /// Lookup a `Variable` in the `MarkovNet` based on the name
    pub fn lookup_variable(&self, name: &str) -> Option<&Variable> {
        self.names.get_by_second(&String::from(name))
    }


    /// Lookup a `Variable`'s name in the `MarkovNet`.
    pub fn lookup_name(&self, var: &Variable) -> Option<&String> {
        self.names.get_by_first(var)
    }


    /// Get all `Variable`s in the model.
    ///
    /// # Note
    /// The order of the returned `Variable`s matches their vertex indices in ```graph()```.
    pub fn variables(&self) -> Vec<Variable> {
        self.factor_index.keys().cloned().collect()
    }


    /// Get the number of `Variable`s in the `MarkovNet`
    pub fn num_variables(&self) -> usize {
        self.factor_index.len()
    }


    /// Check whether a `Variable` is part of the model.
    pub fn contains(&self, var: &Variable) -> bool {
        self.factor_index.contains_key(var)
    }


    /// Get the graph vertex of a `Variable`, if the `Variable` is part of the model.
    pub fn vertex(&self, var: &Variable) -> Option<usize> {
        self.factor_index.get_full(var).map(|(i, _, _)| i)
    }


    /// Get the `Factor`s that comprise the model.
    pub fn factors(&self) -> &Vec<Factor> {
        &self.factors
    }


    /// Get the indices into ```factors()``` of every `Factor` whose scope mentions ```var```.
    ///
    /// # Returns
    /// the indices in the order the `Factor`s were added, or `None` if ```var``` is not part of
    /// the model.
    pub fn factors_with(&self, var: &Variable) -> Option<&Vec<usize>> {
        self.factor_index.get(var)
    }


    /// Get the graph induced by the `Factor`s of the model.
    pub fn graph(&self) -> &UndirectedGraph {
        &self.graph
    }


    /// Compute the partition function of the Gibbs distribution.
    ///
    /// # Note
    /// The partition function is computed by enumerating every joint assignment, so the cost is
    /// exponential in the number of `Variable`s. Intended for small models.
    pub fn partition(&self) -> f64 {
        let vars = self.variables();
        compute_partition(&vars, &self.factors)
    }


    /// Determine the probability of a full `Assignment` to the `Variable`s in the `MarkovNet`.
    ///
    /// Specifically, this computes ```P(zeta)```, where ```zeta``` is a full assignment.
    ///
    /// # Args
    /// * `assignment`: a full `Assignment` to the `MarkovNet`
    ///
    /// # Returns
    /// the probability of the `Assignment` given the model
    ///
    /// # Errors
    /// * `AndreyError::IncompleteAssignment` if ```assignment``` does not cover every `Variable`
    /// * `AndreyError::DivideByZero` if the partition function has no mass
    pub fn probability(&self, assignment: &Assignment) -> Result<f64> {
        let z = self.partition();
        if ! (z > 0.0) {
            return Err(AndreyError::DivideByZero);
        }

        // for every factor in the model
        self.factors.iter()
                    // get the value of the assignment
                    .map(|ref f| f.value(assignment))
                    // and multiply those values together
                    // but if there are any errors, just return the error
                    .fold(Ok(1.0), |acc, val| acc.and_then(|p| val.map(|v| p * v)))
                    // and finally normalize by the partition function
                    .map(|v| v / z)
    }


    /// Condition the `MarkovNet` given the evidence.
    ///
    /// # Args
    /// * `evidence`: a partial `Assignment` of the `Variable`s in this `MarkovNet`.
    ///
    /// # Returns:
    /// a new `MarkovNet` with scope ```self.variables() - evidence.keys()``` that represents the
    /// conditional distribution ```P(self.variables() - evidence.keys() | evidence.keys())```
    ///
    /// # Errors
    /// * `AndreyError::InvalidScope` if the evidence covers every `Variable` of the model
    pub fn condition(&self, evidence: &Assignment) -> Result<MarkovNet> {
        let mut builder = MarkovNetBuilder::new();

        for (v, n) in self.names.iter().filter(|(v, _)| evidence.get(v).is_none()) {
            builder = builder.with_named_variable(v, n);
        }

        for f in self.factors.iter() {
            let reduced = f.reduce(evidence);
            if reduced.is_identity() {
                continue;
            }

            let scope: HashSet<Variable> = reduced.scope().into_iter().collect();
            builder = builder.with_factor(scope, Initialization::Table(reduced));
        }

        builder.build()
    }


    /// Test whether two sets of `Variable`s are independent given a third, observed set.
    ///
    /// Implements the global Markov property (Koller & Friedman Section 4.3.1): ```x``` and
    /// ```y``` are separated given ```given``` if every path between them passes through an
    /// observed `Variable`. Separation is decided on the induced graph by severing every
    /// observed vertex from its neighbors and checking whether some connected component still
    /// contains a vertex from both ```x``` and ```y```.
    ///
    /// # Args
    /// * `x`: the first set of `Variable`s
    /// * `y`: the second set of `Variable`s
    /// * `given`: the observed set; may be empty
    ///
    /// # Returns
    /// ```true``` if ```x``` and ```y``` are separated given ```given```. Separation implies
    /// independence, but `Variable`s that are not separated are not guaranteed to be dependent.
    ///
    /// # Errors
    /// * `AndreyError::UnknownVariable` if any queried `Variable` is not part of the model
    pub fn is_independent(
        &self,
        x: &HashSet<Variable>,
        y: &HashSet<Variable>,
        given: &HashSet<Variable>
    ) -> Result<bool> {
        let xs = self.vertex_set(x)?;
        let ys = self.vertex_set(y)?;
        let gs = self.vertex_set(given)?;

        // sever the observed vertices from the rest of the graph
        let mut graph = self.graph.clone();
        for &g in gs.iter() {
            graph.isolate(g);
        }

        // separated iff no component contains a vertex from both sets
        for component in graph.connected_components() {
            let hits_x = component.iter().any(|v| xs.contains(v));
            let hits_y = component.iter().any(|v| ys.contains(v));
            if hits_x && hits_y {
                return Ok(false);
            }
        }

        Ok(true)
    }


    /// Test whether two sets of `Variable`s are independent given a third, observed set, with
    /// the `Variable`s identified by name.
    ///
    /// See `is_independent`.
    ///
    /// # Errors
    /// * `AndreyError::UnknownVariable` if any name does not identify a `Variable` of the model
    pub fn is_independent_named(&self, x: &[&str], y: &[&str], given: &[&str]) -> Result<bool> {
        let xs = self.named_set(x)?;
        let ys = self.named_set(y)?;
        let gs = self.named_set(given)?;

        self.is_independent(&xs, &ys, &gs)
    }


    /// Map a set of `Variable`s to their graph vertices.
    fn vertex_set(&self, vars: &HashSet<Variable>) -> Result<HashSet<usize>> {
        vars.iter()
            .map(|v| self.vertex(v).ok_or_else(|| AndreyError::UnknownVariable(v.to_string())))
            .collect()
    }


    /// Map a set of names to the `Variable`s they identify.
    fn named_set(&self, names: &[&str]) -> Result<HashSet<Variable>> {
        names.iter()
             .map(|&n| {
                 self.lookup_variable(n)
                     .cloned()
                     .ok_or_else(|| AndreyError::UnknownVariable(String::from(n)))
             })
             .collect()
    }

}


/// Utility function to compute the partition function given a set of `Factor`s.
fn compute_partition(scope: &Vec<Variable>, factors: &Vec<Factor>) -> f64 {
    // unwrapping is safe because the assignments are complete over every factor scope
    let assn_val = |a: Assignment| -> f64 {
        factors.iter().map(|f| f.value(&a).unwrap()).product()
    };
    all_assignments(&scope).map(assn_val).sum()
}


/// An implementation of the [builder pattern] for creating a `MarkovNet`.
///
/// [builder pattern]: https://en.wikipedia.org/wiki/Builder_pattern
pub struct MarkovNetBuilder {

    /// The `Factor`s added to the `MarkovNet`
    factors: Vec<Factor>,

    /// The name <-> variable mapping
    names: BidirMap<Variable, String>,

    /// The error state of the builder, if any
    err: Option<AndreyError>

}

impl MarkovNetBuilder {

    /// Construct a new `MarkovNetBuilder`
    pub fn new() -> MarkovNetBuilder {
        MarkovNetBuilder {
            factors: Vec::new(),
            names: BidirMap::new(),
            err: None
        }
    }


    /// Declare the name for a `Variable` in this `MarkovNet`.
    ///
    /// This is optional; `Variable`s added to the `MarkovNetBuilder` via `with_factor` that
    /// do not have a corresponding name will be assigned a default name.
    ///
    /// # Errors
    /// The builder enters an error state if ```var``` already has a name or if ```name```
    /// already identifies another `Variable`. The error is reported by `build`.
    pub fn with_named_variable(mut self, var: &Variable, name: &str) -> Self {
        if self.err.is_some() {
            return self;
        }

        if self.names.contains_first_key(var) {
            self.err = Some(AndreyError::DuplicateVariable);
        } else if self.names.contains_second_key(&String::from(name)) {
            self.err = Some(AndreyError::DuplicateName(String::from(name)));
        } else {
            self.names.insert(*var, String::from(name));
        }

        self
    }


    /// Add a `Factor` to the `MarkovNet`.
    ///
    /// # Arguments
    /// * `scope`: the `Variable`s in the scope of the `Factor`
    /// * `init`: the desired method of initializing the `Factor`
    pub fn with_factor(mut self, scope: HashSet<Variable>, init: Initialization) -> Self {
        if self.err.is_some() {
            return self;
        }

        match init.build_factor(scope) {
            Ok(f) => {
                self.factors.push(f)
            },
            Err(e) => {
                self.err = Some(e);
            }
        };

        self
    }


    /// Build the `MarkovNet`, ensuring consistency of the `Factor`s and `Variable`s.
    ///
    /// The graph of the `MarkovNet` is induced here: one vertex per `Variable`, in order of
    /// first mention by a `Factor`, with the scope of each `Factor` completed into a clique.
    ///
    /// # Errors
    /// * `AndreyError::InvalidScope` if no `Factor`s were added, or if there is a mismatch
    /// between the `Variable`s defined by calls to `with_named_variable` and `with_factor`
    /// * `AndreyError::DuplicateName` if a registered name collides with the default name of an
    /// unnamed `Variable`
    /// * any error recorded by an earlier builder call
    pub fn build(mut self) -> Result<MarkovNet> {
        if self.err.is_some() {
            return Err(self.err.unwrap());
        }

        // a model without factors has no distribution
        if self.factors.is_empty() {
            return Err(AndreyError::InvalidScope);
        }

        // make sure there are no variables defined but not used in a factor
        for v in self.names.first_col() {
            if ! self.factors.iter().any(|f| f.scope().contains(v)) {
                return Err(AndreyError::InvalidScope);
            }
        }

        // for any unnamed variable in a factor, give it a name; default names obey the same
        // uniqueness rule as registered names
        for ref f in self.factors.iter() {
            for v in f.scope().iter() {
                if ! self.names.contains_first_key(v) {
                    let name = v.to_string();
                    if self.names.contains_second_key(&name) {
                        return Err(AndreyError::DuplicateName(name));
                    }

                    self.names.insert(*v, name);
                }
            }
        }

        // index which factors mention each variable; insertion order fixes the vertex order
        let mut factor_index: IndexMap<Variable, Vec<usize>> = IndexMap::new();
        for (i, f) in self.factors.iter().enumerate() {
            for v in f.scope() {
                factor_index.entry(v).or_insert_with(Vec::new).push(i);
            }
        }

        // induce the graph by completing the scope of each factor into a clique
        let mut graph = UndirectedGraph::new(factor_index.len());
        for f in self.factors.iter() {
            // every scope variable was indexed in the loop above
            let vertices: Vec<usize> = f.scope()
                                        .iter()
                                        .map(|v| factor_index.get_full(v).map(|(i, _, _)| i).unwrap())
                                        .collect();

            for (&u, &w) in iproduct!(vertices.iter(), vertices.iter()) {
                if u != w {
                    graph.add_edge(u, w);
                }
            }
        }

        Ok(MarkovNet {
            factors: self.factors,
            graph,
            factor_index,
            names: self.names
        })
    }

}
