//! Provides an example of how to use Andrey to represent Markov networks.
//!
//! This example is taken from Koller & Friedman Section 4.1: four students meet in pairs to
//! study, and each may or may not have a misconception about the course material.

extern crate andrey;
#[macro_use]
extern crate ndarray;

use andrey as a;

fn main() -> a::Result<()> {

    ///////////////////////////////////////////////////
    // Step 1: Define variables

    let alice = a::Variable::binary();
    let bob = a::Variable::binary();
    let charles = a::Variable::binary();
    let debbie = a::Variable::binary();

    ///////////////////////////////////////////////////
    // Step 2: Build a factor for every pair of students that studies together

    let phi1 = a::Factor::new(vec![alice, bob], array![[30.0, 5.0], [1.0, 10.0]].into_dyn())?;
    let phi2 = a::Factor::new(vec![bob, charles], array![[100.0, 1.0], [1.0, 100.0]].into_dyn())?;
    let phi3 = a::Factor::new(vec![charles, debbie], array![[1.0, 100.0], [100.0, 1.0]].into_dyn())?;
    let phi4 = a::Factor::new(vec![debbie, alice], array![[100.0, 1.0], [1.0, 100.0]].into_dyn())?;

    ///////////////////////////////////////////////////
    // Step 3: Build the model

    let model = a::MarkovNetBuilder::new()
        .with_named_variable(&alice, "A")
        .with_named_variable(&bob, "B")
        .with_named_variable(&charles, "C")
        .with_named_variable(&debbie, "D")
        .with_factor(vec![alice, bob].into_iter().collect(), a::Initialization::Table(phi1))
        .with_factor(vec![bob, charles].into_iter().collect(), a::Initialization::Table(phi2))
        .with_factor(vec![charles, debbie].into_iter().collect(), a::Initialization::Table(phi3))
        .with_factor(vec![debbie, alice].into_iter().collect(), a::Initialization::Table(phi4))
        .build()?;

    println!("partition function Z = {}", model.partition());
    println!();

    ///////////////////////////////////////////////////
    // Step 4: Determine the probability of every assignment

    let scope = model.variables();

    let mut acc = 0.0;
    for assignment in a::all_assignments(&scope) {
        let p = model.probability(&assignment)?;

        println!(
            "P(A = {}, B = {}, C = {}, D = {}) = {:.4}",
            assignment.get(&alice).unwrap(),
            assignment.get(&bob).unwrap(),
            assignment.get(&charles).unwrap(),
            assignment.get(&debbie).unwrap(),
            p
        );

        acc += p;
    }

    println!("--------------------------------------");
    println!("TOTAL:                          {:.4}", acc);
    println!();

    ///////////////////////////////////////////////////
    // Step 5: Query the structural independencies of the model

    println!(
        "A and C independent given B, D: {}",
        model.is_independent_named(&["A"], &["C"], &["B", "D"])?
    );
    println!(
        "B and D independent given A, C: {}",
        model.is_independent_named(&["B"], &["D"], &["A", "C"])?
    );
    println!(
        "A and C independent given B:    {}",
        model.is_independent_named(&["A"], &["C"], &["B"])?
    );

    Ok(())
}
