//! Short-rate simulation engine.
//!
//! Simulates Vasicek and Cox-Ingersoll-Ross short-rate paths with Euler
//! time-stepping and computes the matching closed-form mean and variance
//! curves used to validate and overlay the simulations.
//!
//! ```
//! use short_rate_sim::{RateParams, ShortRateModel};
//!
//! let params = RateParams::new(0.05, 0.1, 0.05, 0.02).unwrap();
//! let paths = ShortRateModel::Vasicek
//!     .simulate_many(&params, 2.0, 0.01, 50, Some(42))
//!     .unwrap();
//! let moments = ShortRateModel::Vasicek.analytic_moments(&params, paths.time_grid());
//! assert_eq!(moments.len(), paths.n_points());
//! assert!(moments.band(1.0).is_some());
//! ```

pub mod models;
pub mod simulation;
pub mod types;

pub use models::{RateDynamics, ShortRateModel};
pub use simulation::SimulationError;
pub use types::{MomentCurve, PathEnsemble, RateParams, SimulationConfig, TimeGrid};

#[cfg(feature = "python")]
mod python {
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::simulation::runner::{run_model_parallel, ParallelBatchConfig};
    use crate::types::{RateParams, SimulationConfig};
    use crate::{ShortRateModel, SimulationError};

    impl From<SimulationError> for PyErr {
        fn from(err: SimulationError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    /// Simulate `path_count` paths of the named model.
    ///
    /// # Returns
    /// `(time_grid, paths)` with `paths` row-major, one row per grid point
    #[pyfunction]
    #[pyo3(signature = (model, params, horizon, dt, path_count, seed = None))]
    fn simulate_many(
        model: &str,
        params: RateParams,
        horizon: f64,
        dt: f64,
        path_count: usize,
        seed: Option<u64>,
    ) -> PyResult<(Vec<f64>, Vec<Vec<f64>>)> {
        let model: ShortRateModel = model.parse()?;
        let ensemble = model.simulate_many(&params, horizon, dt, path_count, seed)?;
        let rows = ensemble.rows();
        Ok((ensemble.time_grid().as_slice().to_vec(), rows))
    }

    /// Parallel variant with per-path substreams.
    #[pyfunction]
    #[pyo3(signature = (model, params, config, n_workers = 0))]
    fn simulate_many_parallel(
        model: &str,
        params: RateParams,
        config: SimulationConfig,
        n_workers: usize,
    ) -> PyResult<(Vec<f64>, Vec<Vec<f64>>)> {
        let model: ShortRateModel = model.parse()?;
        let batch = ParallelBatchConfig::new(
            config,
            if n_workers == 0 { None } else { Some(n_workers) },
        );
        let ensemble = run_model_parallel(model, &params, &batch)?;
        let rows = ensemble.rows();
        Ok((ensemble.time_grid().as_slice().to_vec(), rows))
    }

    /// Closed-form `(mean, variance)`; variance is None for zero speed.
    #[pyfunction]
    fn analytic_moments(
        model: &str,
        params: RateParams,
        times: Vec<f64>,
    ) -> PyResult<(Vec<f64>, Option<Vec<f64>>)> {
        let model: ShortRateModel = model.parse()?;
        let curve = model.analytic_moments(&params, &times);
        Ok((curve.mean, curve.variance))
    }

    /// Python module definition
    #[pymodule]
    fn short_rate_sim(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(simulate_many, m)?)?;
        m.add_function(wrap_pyfunction!(simulate_many_parallel, m)?)?;
        m.add_function(wrap_pyfunction!(analytic_moments, m)?)?;
        m.add_class::<RateParams>()?;
        m.add_class::<SimulationConfig>()?;
        Ok(())
    }
}
