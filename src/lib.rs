//! A library for representing discrete Markov networks and drawing approximate samples from
//! them via Markov-chain Monte-Carlo.

extern crate bidir_map;
extern crate indexmap;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate ndarray;
extern crate ndarray_rand;
extern crate rand;

pub mod variable;
pub mod factor;
pub mod graph;
pub mod init;
pub mod model;
pub mod samplers;
pub mod inference;
pub mod util;

pub use factor::{Factor, Table};
pub use graph::UndirectedGraph;
pub use inference::{ConditionalInferenceEngine, McmcEngine};
pub use init::Initialization;
pub use model::{MarkovNet, MarkovNetBuilder};
pub use samplers::{GibbsSampler, InitialSample, Sampler, SampleTable};
pub use util::{Result, AndreyError};
pub use variable::{all_assignments, Assignment, Variable};
