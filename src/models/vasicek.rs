//! Vasicek short-rate model.
//!
//! ```text
//! dr(t) = a * (b - r(t)) * dt + sigma * dW(t)
//! ```
//!
//! Simulated with a plain Euler scheme. Noise is additive, so paths can
//! go negative; that is standard Vasicek behavior.

use rand_pcg::Pcg64;

use super::RateDynamics;
use crate::simulation::engine::{self, SimulationError};
use crate::types::{MomentCurve, PathEnsemble, RateParams, SimulationConfig, TimeGrid};

/// Vasicek (Ornstein-Uhlenbeck) dynamics.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vasicek;

impl RateDynamics for Vasicek {
    const NAME: &'static str = "vasicek";

    #[inline]
    fn initial_rate(params: &RateParams) -> f64 {
        params.r0
    }

    #[inline]
    fn evolve(params: &RateParams, r_prev: f64, dt: f64, sqrt_dt: f64, z: f64) -> f64 {
        let dr = params.speed * (params.level - r_prev) * dt + params.vol * sqrt_dt * z;
        r_prev + dr
    }

    /// E[r_t] = b + (r0 - b) e^{-a t}
    /// Var[r_t] = sigma^2 / (2a) * (1 - e^{-2 a t}), undefined for a = 0
    fn moments(params: &RateParams, times: &[f64]) -> MomentCurve {
        let a = params.speed;
        let b = params.level;
        let mean = times
            .iter()
            .map(|&t| b + (params.r0 - b) * (-a * t).exp())
            .collect();
        let variance = (a > 0.0).then(|| {
            let scale = params.vol * params.vol / (2.0 * a);
            times
                .iter()
                .map(|&t| scale * (1.0 - (-2.0 * a * t).exp()))
                .collect()
        });
        MomentCurve { mean, variance }
    }
}

/// Simulate one Vasicek path.
///
/// Draws from `rng` when given, otherwise from a fresh entropy-seeded stream.
pub fn simulate_one(
    params: &RateParams,
    horizon: f64,
    dt: f64,
    rng: Option<&mut Pcg64>,
) -> Result<(TimeGrid, Vec<f64>), SimulationError> {
    engine::simulate_one::<Vasicek>(params, horizon, dt, rng)
}

/// Simulate `path_count` Vasicek paths from one shared stream.
pub fn simulate_many(
    params: &RateParams,
    horizon: f64,
    dt: f64,
    path_count: usize,
    seed: Option<u64>,
) -> Result<PathEnsemble, SimulationError> {
    let config = SimulationConfig::new(horizon, dt, path_count, seed)?;
    engine::simulate_many::<Vasicek>(params, &config)
}

/// Closed-form Vasicek mean and variance on `times`.
pub fn analytic_moments(params: &RateParams, times: &[f64]) -> MomentCurve {
    Vasicek::moments(params, times)
}
