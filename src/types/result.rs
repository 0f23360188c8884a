//! Simulation output containers.

use crate::types::grid::TimeGrid;

/// Ensemble of simulated short-rate paths sampled on one time grid.
///
/// Logically an `N x path_count` table: row `i` is grid point `t_i`,
/// column `j` is path `j`. Columns are stored contiguously.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEnsemble {
    grid: TimeGrid,
    columns: Vec<Vec<f64>>,
}

impl PathEnsemble {
    pub(crate) fn new(grid: TimeGrid, columns: Vec<Vec<f64>>) -> Self {
        debug_assert!(columns.iter().all(|c| c.len() == grid.len()));
        Self { grid, columns }
    }

    #[inline]
    pub fn time_grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Number of grid points (table rows).
    #[inline]
    pub fn n_points(&self) -> usize {
        self.grid.len()
    }

    /// Number of paths (table columns).
    #[inline]
    pub fn path_count(&self) -> usize {
        self.columns.len()
    }

    /// Rate of path `path` at grid index `point`.
    #[inline]
    pub fn get(&self, point: usize, path: usize) -> Option<f64> {
        self.columns.get(path)?.get(point).copied()
    }

    /// One simulated path.
    #[inline]
    pub fn column(&self, path: usize) -> Option<&[f64]> {
        self.columns.get(path).map(Vec::as_slice)
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Rates of every path at grid index `point`.
    pub fn row(&self, point: usize) -> Option<Vec<f64>> {
        if point >= self.n_points() {
            return None;
        }
        Some(self.columns.iter().map(|c| c[point]).collect())
    }

    /// Row-major copy of the table, one inner vector per grid point.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        (0..self.n_points())
            .map(|i| self.columns.iter().map(|c| c[i]).collect())
            .collect()
    }

    /// Distribution of the rate at the last grid point.
    pub fn terminal_rates(&self) -> Vec<f64> {
        self.columns
            .iter()
            .filter_map(|c| c.last().copied())
            .collect()
    }

    /// Column labels `path_1 .. path_M` used for tabular export.
    pub fn column_labels(&self) -> Vec<String> {
        (1..=self.path_count()).map(|j| format!("path_{}", j)).collect()
    }

    /// Cross-path sample mean at every grid point.
    pub fn sample_mean(&self) -> Vec<f64> {
        let m = self.path_count() as f64;
        (0..self.n_points())
            .map(|i| self.columns.iter().map(|c| c[i]).sum::<f64>() / m)
            .collect()
    }

    /// Unbiased cross-path sample variance at every grid point.
    ///
    /// `None` for a single path.
    pub fn sample_variance(&self) -> Option<Vec<f64>> {
        let m = self.path_count();
        if m < 2 {
            return None;
        }
        let means = self.sample_mean();
        let variance = means
            .iter()
            .enumerate()
            .map(|(i, mean)| {
                let ss: f64 = self.columns.iter().map(|c| (c[i] - mean).powi(2)).sum();
                ss / (m - 1) as f64
            })
            .collect();
        Some(variance)
    }

    /// Standard error of the sample mean at every grid point.
    pub fn standard_error(&self) -> Option<Vec<f64>> {
        let m = self.path_count() as f64;
        self.sample_variance()
            .map(|var| var.into_iter().map(|v| (v / m).sqrt()).collect())
    }

    pub fn into_parts(self) -> (TimeGrid, Vec<Vec<f64>>) {
        (self.grid, self.columns)
    }
}

/// Closed-form mean and variance curves on a set of time points.
///
/// `variance` is `None` when the closed form is undefined (zero
/// mean-reversion speed); callers must skip any variance band then.
#[derive(Debug, Clone, PartialEq)]
pub struct MomentCurve {
    pub mean: Vec<f64>,
    pub variance: Option<Vec<f64>>,
}

impl MomentCurve {
    #[inline]
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    #[inline]
    pub fn has_variance(&self) -> bool {
        self.variance.is_some()
    }

    /// Pointwise standard deviation.
    pub fn std_dev(&self) -> Option<Vec<f64>> {
        self.variance
            .as_ref()
            .map(|var| var.iter().map(|v| v.max(0.0).sqrt()).collect())
    }

    /// `(mean - k*sd, mean + k*sd)` band, e.g. `k = 1.0` for the ±1σ overlay.
    pub fn band(&self, k: f64) -> Option<(Vec<f64>, Vec<f64>)> {
        let sd = self.std_dev()?;
        let lower = self.mean.iter().zip(&sd).map(|(m, s)| m - k * s).collect();
        let upper = self.mean.iter().zip(&sd).map(|(m, s)| m + k * s).collect();
        Some((lower, upper))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> PathEnsemble {
        let grid = TimeGrid::new(0.3, 0.1).unwrap();
        PathEnsemble::new(
            grid,
            vec![vec![0.01, 0.02, 0.03], vec![0.01, 0.04, 0.01]],
        )
    }

    #[test]
    fn test_table_accessors() {
        let ens = sample();
        assert_eq!(ens.n_points(), 3);
        assert_eq!(ens.path_count(), 2);
        assert_eq!(ens.get(1, 1), Some(0.04));
        assert_eq!(ens.get(3, 0), None);
        assert_eq!(ens.row(2), Some(vec![0.03, 0.01]));
        assert_eq!(ens.rows()[1], vec![0.02, 0.04]);
        assert_eq!(ens.terminal_rates(), vec![0.03, 0.01]);
        assert_eq!(ens.column_labels(), vec!["path_1", "path_2"]);
    }

    #[test]
    fn test_cross_section_statistics() {
        let ens = sample();
        let mean = ens.sample_mean();
        assert_relative_eq!(mean[1], 0.03, epsilon = 1e-15);

        let var = ens.sample_variance().unwrap();
        assert_relative_eq!(var[0], 0.0);
        assert_relative_eq!(var[1], 0.0002, epsilon = 1e-15);

        let se = ens.standard_error().unwrap();
        assert_relative_eq!(se[1], 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_single_path_has_no_variance() {
        let grid = TimeGrid::new(0.2, 0.1).unwrap();
        let ens = PathEnsemble::new(grid, vec![vec![0.05, 0.06]]);
        assert!(ens.sample_variance().is_none());
        assert!(ens.standard_error().is_none());
    }

    #[test]
    fn test_band_requires_variance() {
        let curve = MomentCurve {
            mean: vec![0.05, 0.05],
            variance: None,
        };
        assert!(curve.band(1.0).is_none());

        let curve = MomentCurve {
            mean: vec![0.05, 0.05],
            variance: Some(vec![0.0, 0.0004]),
        };
        let (lower, upper) = curve.band(1.0).unwrap();
        assert_relative_eq!(lower[1], 0.03, epsilon = 1e-15);
        assert_relative_eq!(upper[1], 0.07, epsilon = 1e-15);
        assert_relative_eq!(lower[0], 0.05);
    }
}
