//! Model parameters and simulation configuration.

#[cfg(feature = "python")]
use pyo3::prelude::*;

use crate::simulation::engine::SimulationError;

/// Parameters shared by both short-rate models.
///
/// The same tuple drives Vasicek (`a`, `b`, `sigma`) and CIR
/// (`kappa`, `theta`, `sigma`).
#[cfg_attr(feature = "python", pyclass)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateParams {
    /// Initial short rate r(0)
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub r0: f64,

    /// Mean reversion speed (a / kappa), must be >= 0
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub speed: f64,

    /// Long-run mean level (b / theta)
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub level: f64,

    /// Volatility (sigma), must be >= 0
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub vol: f64,
}

impl RateParams {
    /// Create validated model parameters.
    ///
    /// # Example
    ///
    /// ```
    /// use short_rate_sim::RateParams;
    ///
    /// assert!(RateParams::new(0.05, 0.1, 0.05, 0.02).is_ok());
    /// assert!(RateParams::new(0.05, -0.1, 0.05, 0.02).is_err());
    /// ```
    pub fn new(r0: f64, speed: f64, level: f64, vol: f64) -> Result<Self, SimulationError> {
        let params = Self {
            r0,
            speed,
            level,
            vol,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the parameter invariants: everything finite, `speed >= 0`, `vol >= 0`.
    ///
    /// A negative `r0` is accepted; CIR clamps it to zero.
    pub fn validate(&self) -> Result<(), SimulationError> {
        require_finite("r0", self.r0)?;
        require_non_negative("speed", self.speed)?;
        require_finite("level", self.level)?;
        require_non_negative("vol", self.vol)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl RateParams {
    #[new]
    #[pyo3(signature = (r0, speed, level, vol))]
    fn py_new(r0: f64, speed: f64, level: f64, vol: f64) -> PyResult<Self> {
        Ok(Self::new(r0, speed, level, vol)?)
    }

    fn __repr__(&self) -> String {
        format!(
            "RateParams(r0={}, speed={}, level={}, vol={})",
            self.r0, self.speed, self.level, self.vol
        )
    }
}

/// Configuration for a simulation run.
#[cfg_attr(feature = "python", pyclass)]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Horizon T in years
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub horizon: f64,

    /// Time step in years
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub dt: f64,

    /// Number of simulated paths
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub path_count: usize,

    /// Random seed for reproducibility (None = entropy)
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Create a validated configuration.
    pub fn new(
        horizon: f64,
        dt: f64,
        path_count: usize,
        seed: Option<u64>,
    ) -> Result<Self, SimulationError> {
        let config = Self {
            horizon,
            dt,
            path_count,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check `horizon > 0`, `dt > 0` and `path_count >= 1`.
    pub fn validate(&self) -> Result<(), SimulationError> {
        validate_grid(self.horizon, self.dt)?;
        if self.path_count == 0 {
            return Err(SimulationError::InvalidParameter {
                name: "path_count",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Number of grid points, `ceil(horizon / dt)`.
    #[inline]
    pub fn n_grid_points(&self) -> usize {
        grid_len(self.horizon, self.dt)
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl SimulationConfig {
    #[new]
    #[pyo3(signature = (horizon, dt, path_count, seed = None))]
    fn py_new(horizon: f64, dt: f64, path_count: usize, seed: Option<u64>) -> PyResult<Self> {
        Ok(Self::new(horizon, dt, path_count, seed)?)
    }

    fn __repr__(&self) -> String {
        format!(
            "SimulationConfig(horizon={}, dt={}, path_count={}, seed={:?})",
            self.horizon, self.dt, self.path_count, self.seed
        )
    }
}

/// Largest number of grid points a single run may allocate.
const MAX_GRID_POINTS: f64 = u32::MAX as f64;

pub(crate) fn validate_grid(horizon: f64, dt: f64) -> Result<(), SimulationError> {
    require_positive("horizon", horizon)?;
    require_positive("dt", dt)?;
    let steps = horizon / dt;
    if !steps.is_finite() || steps.ceil() > MAX_GRID_POINTS {
        return Err(SimulationError::InvalidParameter {
            name: "dt",
            value: dt,
            reason: "too small for the horizon, grid would exceed u32::MAX points",
        });
    }
    if dt > horizon {
        tracing::warn!(horizon, dt, "time step exceeds horizon, grid holds only t = 0");
    }
    Ok(())
}

#[inline]
pub(crate) fn grid_len(horizon: f64, dt: f64) -> usize {
    (horizon / dt).ceil() as usize
}

fn require_finite(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<(), SimulationError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter {
            name,
            value,
            reason: "must be positive",
        })
    }
}

fn require_non_negative(name: &'static str, value: f64) -> Result<(), SimulationError> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter {
            name,
            value,
            reason: "must be non-negative",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_horizon() {
        let err = SimulationConfig::new(0.0, 0.01, 10, None).unwrap_err();
        match err {
            SimulationError::InvalidParameter { name, .. } => assert_eq!(name, "horizon"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_non_positive_dt() {
        let err = SimulationConfig::new(1.0, -0.01, 10, None).unwrap_err();
        assert!(err.to_string().contains("dt"));
    }

    #[test]
    fn test_rejects_zero_paths() {
        let err = SimulationConfig::new(1.0, 0.01, 0, Some(1)).unwrap_err();
        assert!(err.to_string().contains("path_count"));
    }

    #[test]
    fn test_rejects_nan_horizon() {
        assert!(SimulationConfig::new(f64::NAN, 0.01, 1, None).is_err());
    }

    #[test]
    fn test_dt_larger_than_horizon_is_allowed() {
        let config = SimulationConfig::new(0.5, 1.0, 1, None).unwrap();
        assert_eq!(config.n_grid_points(), 1);
    }

    #[test]
    fn test_grid_points_round_up() {
        let config = SimulationConfig::new(1.05, 0.1, 1, None).unwrap();
        assert_eq!(config.n_grid_points(), 11);
    }

    #[test]
    fn test_rejects_grid_too_large() {
        let err = SimulationConfig::new(1.0, 1e-300, 1, Some(0)).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidParameter { name: "dt", .. }));

        // horizon / dt overflows to infinity
        let err = SimulationConfig::new(1e300, 1e-300, 1, Some(0)).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidParameter { name: "dt", .. }));

        assert!(SimulationConfig::new(1.0, 1e-6, 1, None).is_ok());
    }

    #[test]
    fn test_params_validation() {
        assert!(RateParams::new(-0.01, 0.0, 0.05, 0.0).is_ok());
        assert!(RateParams::new(0.05, 0.1, 0.05, -0.02).is_err());
        assert!(RateParams::new(f64::INFINITY, 0.1, 0.05, 0.02).is_err());
    }
}
