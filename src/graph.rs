//! Defines an `UndirectedGraph` over integer vertices.
//!
//! The graph records the structure of a Markov network: one vertex per `Variable`, one edge per
//! pair of `Variable`s that interact through a factor. Vertices are plain indices; the model
//! owns the mapping between indices and `Variable`s.

use std::collections::{HashSet, VecDeque};

/// An undirected graph over the vertices ```0..vertex_count```.
///
/// The vertex set is fixed at construction; edges may be added and removed freely.
#[derive(Clone, Debug)]
pub struct UndirectedGraph {

    /// Adjacency sets; ```adjacency[v]``` holds the neighbors of ```v```
    adjacency: Vec<HashSet<usize>>

}

impl UndirectedGraph {

    /// Construct a new `UndirectedGraph` with ```n``` vertices and no edges
    pub fn new(n: usize) -> UndirectedGraph {
        UndirectedGraph { adjacency: vec![HashSet::new(); n] }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|neighbors| neighbors.len()).sum::<usize>() / 2
    }

    /// Add the edge ```{u, v}```. Adding an existing edge has no effect; self loops are not
    /// representable and are ignored.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        if u == v {
            return;
        }

        self.adjacency[u].insert(v);
        self.adjacency[v].insert(u);
    }

    /// Check whether the edge ```{u, v}``` is present
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency[u].contains(&v)
    }

    /// Remove the edge ```{u, v}```, if present
    pub fn remove_edge(&mut self, u: usize, v: usize) {
        self.adjacency[u].remove(&v);
        self.adjacency[v].remove(&u);
    }

    /// Get the neighbors of ```v```
    pub fn neighbors(&self, v: usize) -> &HashSet<usize> {
        &self.adjacency[v]
    }

    /// Get the degree of ```v```
    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    /// Remove every edge incident to ```v```. The vertex itself remains.
    pub fn isolate(&mut self, v: usize) {
        let neighbors: Vec<usize> = self.adjacency[v].iter().cloned().collect();
        for u in neighbors {
            self.remove_edge(u, v);
        }
    }

    /// Compute the connected components of the graph.
    ///
    /// # Returns
    /// the components as vectors of vertex indices. Every vertex appears in exactly one
    /// component; a vertex with no edges forms a singleton component.
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.vertex_count()];
        let mut components = Vec::new();

        for start in 0..self.vertex_count() {
            if visited[start] {
                continue;
            }

            // breadth-first sweep from the first unvisited vertex
            let mut component = Vec::new();
            let mut frontier = VecDeque::new();
            visited[start] = true;
            frontier.push_back(start);

            while let Some(v) = frontier.pop_front() {
                component.push(v);

                for &u in self.adjacency[v].iter() {
                    if ! visited[u] {
                        visited[u] = true;
                        frontier.push_back(u);
                    }
                }
            }

            components.push(component);
        }

        components
    }

}
