//! Minimizes the two-dimensional Drop-Wave function with a single
//! population and prints the hall of fame's best fitness per generation.
//!
//! Run with `RUST_LOG=debug cargo run --example drop_wave` to see the
//! engine's own log output.

use std::sync::Arc;
use u_genetic::functions::drop_wave;
use u_genetic::genome::RealVector;
use u_genetic::random::GaRng;
use u_genetic::{Ga, GaConfig, GaError};

fn main() -> Result<(), GaError> {
    env_logger::init();

    let objective = Arc::new(drop_wave);
    let factory = move |rng: &mut GaRng| RealVector::random(2, -10.0, 10.0, objective.clone(), rng);

    let config = GaConfig::default().with_population_count(1);
    let mut ga = Ga::new(config, factory)?;
    ga.initialize()?;

    println!("Best fitness at generation 0: {:.6}", ga.best()?.fitness());
    for i in 1..=30 {
        ga.evolve()?;
        println!("Best fitness at generation {i}: {:.6}", ga.best()?.fitness());
    }

    let best = ga.best()?;
    println!("Best solution: {:?}", best.genome().genes());
    ga.terminate();
    Ok(())
}
