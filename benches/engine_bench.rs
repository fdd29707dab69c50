//! Criterion benchmarks for the GA engine.
//!
//! Uses synthetic objectives (Sphere, Drop-Wave) to measure the engine's
//! own overhead: breeding, evaluation dispatch, hall of fame and migration.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use u_genetic::functions::{drop_wave, sphere};
use u_genetic::genome::RealVector;
use u_genetic::random::GaRng;
use u_genetic::{EvaluationFailure, Ga, GaConfig};

type Objective = fn(&[f64]) -> Result<f64, EvaluationFailure>;

fn run(objective: Objective, dim: usize, config: &GaConfig, generations: usize) -> f64 {
    let objective = Arc::new(objective);
    let factory = move |rng: &mut GaRng| RealVector::random(dim, -5.0, 5.0, objective.clone(), rng);
    let mut ga = Ga::new(config.clone(), factory).expect("valid benchmark config");
    ga.run(generations, None)
        .expect("benchmark objectives never fail")
        .best_fitness
}

fn bench_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_sphere");
    group.sample_size(10);

    for (dim, pop, gen) in [(10usize, 50usize, 50usize), (50, 100, 30), (100, 100, 20)] {
        let config = GaConfig::default()
            .with_population_count(1)
            .with_population_size(pop)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("d{}_p{}_g{}", dim, pop, gen), dim),
            &config,
            |b, config| b.iter(|| black_box(run(sphere, dim, black_box(config), gen))),
        );
    }
    group.finish();
}

fn bench_islands(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_drop_wave_islands");
    group.sample_size(10);

    for &islands in &[1usize, 2, 4, 8] {
        for parallel in [false, true] {
            let config = GaConfig::default()
                .with_population_count(islands)
                .with_population_size(100)
                .with_migration(5, 3)
                .with_parallel(parallel)
                .with_seed(42);
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(
                BenchmarkId::new(label, islands),
                &config,
                |b, config| b.iter(|| black_box(run(drop_wave, 2, black_box(config), 30))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_sphere, bench_islands);
criterion_main!(benches);
