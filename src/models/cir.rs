//! Cox-Ingersoll-Ross (CIR) short-rate model.
//!
//! ```text
//! dr(t) = kappa * (theta - r(t)) * dt + sigma * sqrt(r(t)) * dW(t)
//! ```
//!
//! ## Discretization
//!
//! Full-truncation Euler: the previous value is floored at zero before it
//! enters the drift and the square root, and the new value is floored again.
//!
//! ```text
//! r+ = max(r(t), 0)
//! r(t+dt) = max(r+ + kappa * (theta - r+) * dt + sigma * sqrt(r+) * sqrt(dt) * Z, 0)
//! ```
//!
//! The scheme is biased near zero. Exact non-central chi-squared sampling
//! is not provided.
//!
//! ## Feller Condition
//!
//! The continuous process stays strictly positive when `2 * kappa * theta >= sigma^2`.
//! See [`feller_ratio`].

use rand_pcg::Pcg64;

use super::RateDynamics;
use crate::simulation::engine::{self, SimulationError};
use crate::types::{MomentCurve, PathEnsemble, RateParams, SimulationConfig, TimeGrid};

/// CIR square-root diffusion dynamics.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cir;

impl RateDynamics for Cir {
    const NAME: &'static str = "cir";

    /// Negative initial rates are clamped to zero.
    #[inline]
    fn initial_rate(params: &RateParams) -> f64 {
        params.r0.max(0.0)
    }

    #[inline]
    fn evolve(params: &RateParams, r_prev: f64, dt: f64, sqrt_dt: f64, z: f64) -> f64 {
        let r_pos = r_prev.max(0.0);
        let drift = params.speed * (params.level - r_pos) * dt;
        let diffusion = params.vol * r_pos.sqrt() * sqrt_dt * z;
        (r_pos + drift + diffusion).max(0.0)
    }

    /// E[r_t] = theta + (r0 - theta) e^{-kappa t}
    ///
    /// For kappa > 0:
    /// Var[r_t] = sigma^2 * (r0 e^{-kt} (1 - e^{-kt}) / kappa + theta (1 - e^{-kt})^2 / (2 kappa))
    ///
    /// Uses `r0` as given. For a negative `r0` the curve starts below the
    /// clamped paths.
    fn moments(params: &RateParams, times: &[f64]) -> MomentCurve {
        let kappa = params.speed;
        let theta = params.level;
        let r0 = params.r0;
        let sigma2 = params.vol * params.vol;

        let decay: Vec<f64> = times.iter().map(|&t| (-kappa * t).exp()).collect();
        let mean = decay.iter().map(|&e| theta + (r0 - theta) * e).collect();
        let variance = (kappa > 0.0).then(|| {
            decay
                .iter()
                .map(|&e| {
                    let one_minus = 1.0 - e;
                    sigma2
                        * (r0 * e * one_minus / kappa
                            + theta * one_minus * one_minus / (2.0 * kappa))
                })
                .collect()
        });
        MomentCurve { mean, variance }
    }
}

/// Feller ratio `2 * kappa * theta / sigma^2`.
///
/// Values >= 1.0 satisfy the Feller condition. Infinite when `sigma == 0`.
pub fn feller_ratio(params: &RateParams) -> f64 {
    let numerator = 2.0 * params.speed * params.level;
    let denominator = params.vol * params.vol;
    if denominator > 0.0 {
        numerator / denominator
    } else {
        f64::INFINITY
    }
}

/// Check `2 * kappa * theta >= sigma^2`.
pub fn satisfies_feller(params: &RateParams) -> bool {
    2.0 * params.speed * params.level >= params.vol * params.vol
}

/// Simulate one CIR path.
///
/// Draws from `rng` when given, otherwise from a fresh entropy-seeded stream.
pub fn simulate_one(
    params: &RateParams,
    horizon: f64,
    dt: f64,
    rng: Option<&mut Pcg64>,
) -> Result<(TimeGrid, Vec<f64>), SimulationError> {
    engine::simulate_one::<Cir>(params, horizon, dt, rng)
}

/// Simulate `path_count` CIR paths from one shared stream.
pub fn simulate_many(
    params: &RateParams,
    horizon: f64,
    dt: f64,
    path_count: usize,
    seed: Option<u64>,
) -> Result<PathEnsemble, SimulationError> {
    let config = SimulationConfig::new(horizon, dt, path_count, seed)?;
    engine::simulate_many::<Cir>(params, &config)
}

/// Closed-form CIR mean and variance on `times`.
///
/// The formulas take the raw `r0`, while simulated paths start from
/// `max(r0, 0)`.
pub fn analytic_moments(params: &RateParams, times: &[f64]) -> MomentCurve {
    Cir::moments(params, times)
}
