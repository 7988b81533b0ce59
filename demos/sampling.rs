//! Provides an example of how to use Andrey to draw approximate samples from a Markov network
//! with a Gibbs sampler, and to estimate a conditional marginal with the MCMC engine.

extern crate andrey;
#[macro_use]
extern crate ndarray;
extern crate rand;

use andrey as a;
use a::ConditionalInferenceEngine;

use rand::{SeedableRng, StdRng};

fn main() -> a::Result<()> {

    ///////////////////////////////////////////////////
    // Step 1: Define variables and build the chain X - Y - Z

    let x = a::Variable::binary();
    let y = a::Variable::binary();
    let z = a::Variable::binary();

    let phi_xy = a::Factor::new(vec![x, y], array![[4.0, 1.0], [1.0, 4.0]].into_dyn())?;
    let phi_yz = a::Factor::new(vec![y, z], array![[4.0, 1.0], [1.0, 4.0]].into_dyn())?;

    let model = a::MarkovNetBuilder::new()
        .with_named_variable(&x, "X")
        .with_named_variable(&y, "Y")
        .with_named_variable(&z, "Z")
        .with_factor(vec![x, y].into_iter().collect(), a::Initialization::Table(phi_xy))
        .with_factor(vec![y, z].into_iter().collect(), a::Initialization::Table(phi_yz))
        .build()?;

    ///////////////////////////////////////////////////
    // Step 2: Fix the evidence and configure the sampler

    let mut evidence = a::Assignment::new();
    evidence.set(&z, 0);

    let seed: &[_] = &[17];
    let rng: StdRng = SeedableRng::from_seed(seed);

    let mut sampler = a::GibbsSampler::new(&model, &evidence, a::InitialSample::Random, rng)?;

    ///////////////////////////////////////////////////
    // Step 3: Run the chain with burn in and thinning

    let nsamples = 2000;
    let table = sampler.run(nsamples, 500, 1)?;

    println!("drew {} samples over columns {:?}", table.len(), table.names());
    for name in ["X", "Y", "Z"].iter() {
        let ones = table.column(name).unwrap().iter().filter(|&&val| val == 1).count();
        let freq = (ones as f64) / (nsamples as f64);
        println!("frequency of {} = 1: {:.3}", name, freq);
    }
    println!();

    ///////////////////////////////////////////////////
    // Step 4: Estimate P(X | Z = 0) with the MCMC engine

    let mut engine = a::McmcEngine::new(&mut sampler, 100, 5000)?;
    let marginal = engine.infer(&vec![x].into_iter().collect())?;

    let mut assn = a::Assignment::new();
    assn.set(&x, 0);
    println!("estimated P(X = 0 | Z = 0) = {:.3}", marginal.value(&assn)?);
    assn.set(&x, 1);
    println!("estimated P(X = 1 | Z = 0) = {:.3}", marginal.value(&assn)?);

    Ok(())
}
