//! Runtime model selection.

use std::str::FromStr;

use derive_more::Display;
use rand_pcg::Pcg64;

use super::{Cir, RateDynamics, Vasicek};
use crate::simulation::engine::{self, SimulationError};
use crate::types::{MomentCurve, PathEnsemble, RateParams, SimulationConfig, TimeGrid};

/// Short-rate model selected by name.
///
/// Every variant exposes the same three operations, so callers stay
/// model-agnostic.
///
/// ```
/// use short_rate_sim::{RateParams, ShortRateModel};
///
/// let model: ShortRateModel = "CIR".parse().unwrap();
/// assert_eq!(model.to_string(), "cir");
///
/// let params = RateParams::new(0.03, 0.5, 0.05, 0.1).unwrap();
/// let paths = model.simulate_many(&params, 1.0, 0.01, 4, Some(42)).unwrap();
/// assert_eq!(paths.n_points(), 100);
/// assert_eq!(paths.path_count(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ShortRateModel {
    #[display("vasicek")]
    Vasicek,
    #[display("cir")]
    Cir,
}

impl ShortRateModel {
    pub const ALL: [ShortRateModel; 2] = [ShortRateModel::Vasicek, ShortRateModel::Cir];

    /// See [`crate::models::vasicek::simulate_one`].
    pub fn simulate_one(
        self,
        params: &RateParams,
        horizon: f64,
        dt: f64,
        rng: Option<&mut Pcg64>,
    ) -> Result<(TimeGrid, Vec<f64>), SimulationError> {
        match self {
            ShortRateModel::Vasicek => engine::simulate_one::<Vasicek>(params, horizon, dt, rng),
            ShortRateModel::Cir => engine::simulate_one::<Cir>(params, horizon, dt, rng),
        }
    }

    /// Simulate `path_count` paths from one shared stream seeded by `seed`.
    pub fn simulate_many(
        self,
        params: &RateParams,
        horizon: f64,
        dt: f64,
        path_count: usize,
        seed: Option<u64>,
    ) -> Result<PathEnsemble, SimulationError> {
        let config = SimulationConfig::new(horizon, dt, path_count, seed)?;
        self.simulate(params, &config)
    }

    /// Same as [`Self::simulate_many`] with a prebuilt configuration.
    pub fn simulate(
        self,
        params: &RateParams,
        config: &SimulationConfig,
    ) -> Result<PathEnsemble, SimulationError> {
        match self {
            ShortRateModel::Vasicek => engine::simulate_many::<Vasicek>(params, config),
            ShortRateModel::Cir => engine::simulate_many::<Cir>(params, config),
        }
    }

    pub fn analytic_moments(self, params: &RateParams, times: &[f64]) -> MomentCurve {
        match self {
            ShortRateModel::Vasicek => Vasicek::moments(params, times),
            ShortRateModel::Cir => Cir::moments(params, times),
        }
    }
}

impl FromStr for ShortRateModel {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vasicek" => Ok(ShortRateModel::Vasicek),
            "cir" | "cox-ingersoll-ross" => Ok(ShortRateModel::Cir),
            _ => Err(SimulationError::UnknownModel(s.to_string())),
        }
    }
}
