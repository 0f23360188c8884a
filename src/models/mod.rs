//! Short-rate models.
//!
//! Each model implements [`RateDynamics`], the per-step update plus its
//! closed-form moments. The simulation engine is generic over this trait
//! and [`ShortRateModel`] selects a model at runtime.

pub mod cir;
pub mod kind;
pub mod vasicek;

pub use cir::Cir;
pub use kind::ShortRateModel;
pub use vasicek::Vasicek;

use crate::types::{MomentCurve, RateParams};

/// Discretized dynamics of a single-factor short-rate model.
pub trait RateDynamics {
    /// Model name used in logs.
    const NAME: &'static str;

    /// Value of the path at t = 0.
    fn initial_rate(params: &RateParams) -> f64;

    /// One Euler step from `r_prev` with standard normal draw `z`.
    ///
    /// `sqrt_dt` is passed in so the hot loop computes it once.
    fn evolve(params: &RateParams, r_prev: f64, dt: f64, sqrt_dt: f64, z: f64) -> f64;

    /// Closed-form mean and variance at each of `times`.
    fn moments(params: &RateParams, times: &[f64]) -> MomentCurve;
}
