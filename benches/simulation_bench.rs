//! Benchmarks for the simulation engine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use short_rate_sim::simulation::{new_stream, run_model_parallel, ParallelBatchConfig};
use short_rate_sim::{RateParams, ShortRateModel, SimulationConfig, TimeGrid};

fn params() -> RateParams {
    RateParams::new(0.03, 0.5, 0.05, 0.05).unwrap()
}

fn benchmark_single_path(c: &mut Criterion) {
    let params = params();

    for model in ShortRateModel::ALL {
        let mut rng = new_stream(Some(42));
        c.bench_function(&format!("{model}_path_1000_steps"), |bench| {
            bench.iter(|| {
                black_box(
                    model
                        .simulate_one(&params, 1.0, 0.001, Some(&mut rng))
                        .unwrap(),
                )
            })
        });
    }
}

fn benchmark_ensemble(c: &mut Criterion) {
    let params = params();
    let config = SimulationConfig::new(1.0, 0.01, 500, Some(42)).unwrap();

    for model in ShortRateModel::ALL {
        c.bench_function(&format!("{model}_ensemble_500x100"), |bench| {
            bench.iter(|| black_box(model.simulate(&params, &config).unwrap()))
        });
    }

    let batch = ParallelBatchConfig::new(config, None);
    c.bench_function("cir_ensemble_500x100_parallel", |bench| {
        bench.iter(|| black_box(run_model_parallel(ShortRateModel::Cir, &params, &batch).unwrap()))
    });
}

fn benchmark_analytic_moments(c: &mut Criterion) {
    let params = params();
    let grid = TimeGrid::new(10.0, 0.001).unwrap();

    c.bench_function("cir_analytic_moments_10k", |bench| {
        bench.iter(|| black_box(ShortRateModel::Cir.analytic_moments(&params, black_box(&grid))))
    });
}

criterion_group!(
    benches,
    benchmark_single_path,
    benchmark_ensemble,
    benchmark_analytic_moments,
);

criterion_main!(benches);
