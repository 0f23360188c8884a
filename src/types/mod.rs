//! Core types for the simulation engine.

pub mod config;
pub mod grid;
pub mod result;

pub use config::{RateParams, SimulationConfig};
pub use grid::TimeGrid;
pub use result::{MomentCurve, PathEnsemble};
