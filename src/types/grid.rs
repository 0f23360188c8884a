//! Uniform simulation time grid.

use derive_more::{Deref, IntoIterator};

use crate::simulation::engine::SimulationError;
use crate::types::config::{grid_len, validate_grid};

/// Evenly spaced time points `0, dt, 2*dt, ..., (N-1)*dt` with `N = ceil(T/dt)`.
///
/// The grid does not include `T` itself unless `T` is a multiple of `dt`.
#[derive(Debug, Clone, PartialEq, Deref, IntoIterator)]
pub struct TimeGrid {
    #[deref]
    #[into_iterator(owned, ref)]
    points: Vec<f64>,
    dt: f64,
}

impl TimeGrid {
    /// Build the grid for horizon `horizon` and step `dt`.
    ///
    /// # Example
    ///
    /// ```
    /// use short_rate_sim::TimeGrid;
    ///
    /// let grid = TimeGrid::new(0.02, 0.01).unwrap();
    /// assert_eq!(grid.as_slice(), &[0.0, 0.01]);
    /// ```
    pub fn new(horizon: f64, dt: f64) -> Result<Self, SimulationError> {
        validate_grid(horizon, dt)?;
        let n = grid_len(horizon, dt);
        let points = (0..n).map(|i| i as f64 * dt).collect();
        Ok(Self { points, dt })
    }

    /// Grid spacing.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.points
    }

    /// Last time point on the grid.
    #[inline]
    pub fn last_time(&self) -> f64 {
        self.points.last().copied().unwrap_or(0.0)
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.points
    }
}
