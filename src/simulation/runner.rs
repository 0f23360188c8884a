//! Parallel simulation runner using rayon.
//!
//! Instead of one shared stream, every path gets its own PCG substream
//! derived from `(seed, path_index)`. Paths can then be generated on any
//! thread in any order while the run stays reproducible and prefix-stable.
//! The realization differs from the sequential engine for the same seed.

use rayon::prelude::*;
use rand_pcg::Pcg64;

use crate::models::{Cir, RateDynamics, ShortRateModel, Vasicek};
use crate::simulation::engine::{simulate_path, SimulationError};
use crate::types::{PathEnsemble, RateParams, SimulationConfig, TimeGrid};

/// Configuration for a parallel batch.
#[derive(Debug, Clone)]
pub struct ParallelBatchConfig {
    /// Grid, path count and seed
    pub config: SimulationConfig,
    /// Number of parallel workers (None = auto-detect)
    pub n_workers: Option<usize>,
}

impl ParallelBatchConfig {
    pub fn new(config: SimulationConfig, n_workers: Option<usize>) -> Self {
        Self { config, n_workers }
    }
}

/// SplitMix64 finalizer step.
#[inline]
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Independent substream for path `path_index` of a run seeded with `base_seed`.
///
/// Both the 128-bit state and the increment depend on the path: the state is
/// a SplitMix64 hash of `(base_seed, path_index)`, the increment is the index.
pub fn path_stream(base_seed: u64, path_index: usize) -> Pcg64 {
    let hi = splitmix64(base_seed ^ splitmix64(path_index as u64));
    let lo = splitmix64(hi);
    let state = (hi as u128) << 64 | lo as u128;
    Pcg64::new(state, path_index as u128)
}

/// Run a parallel simulation of model `M`.
pub fn simulate_many_parallel<M: RateDynamics>(
    params: &RateParams,
    batch: &ParallelBatchConfig,
) -> Result<PathEnsemble, SimulationError> {
    params.validate()?;
    let config = &batch.config;
    config.validate()?;
    let grid = TimeGrid::new(config.horizon, config.dt)?;
    let n = grid.len();

    // Configure thread pool
    let n_workers = batch.n_workers.unwrap_or_else(rayon::current_num_threads);
    if n_workers == 0 {
        return Err(SimulationError::InvalidConfig(
            "n_workers must be at least 1".to_string(),
        ));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_workers)
        .build()
        .map_err(|e| SimulationError::InvalidConfig(format!("Failed to create thread pool: {}", e)))?;

    let base_seed = config.seed.unwrap_or_else(rand::random);
    tracing::debug!(
        model = M::NAME,
        n_points = n,
        path_count = config.path_count,
        base_seed,
        n_workers,
        "simulating ensemble in parallel"
    );

    let params = *params;
    let dt = config.dt;
    let columns: Vec<Vec<f64>> = pool.install(|| {
        (0..config.path_count)
            .into_par_iter()
            .map(|j| {
                let mut rng = path_stream(base_seed, j);
                simulate_path::<M, _>(&params, n, dt, &mut rng)
            })
            .collect()
    });

    Ok(PathEnsemble::new(grid, columns))
}

/// Run a parallel simulation of the selected model.
pub fn run_model_parallel(
    model: ShortRateModel,
    params: &RateParams,
    batch: &ParallelBatchConfig,
) -> Result<PathEnsemble, SimulationError> {
    match model {
        ShortRateModel::Vasicek => simulate_many_parallel::<Vasicek>(params, batch),
        ShortRateModel::Cir => simulate_many_parallel::<Cir>(params, batch),
    }
}
