//! Simulation engine and parallel runner.

pub mod engine;
pub mod runner;

pub use engine::{new_stream, SimulationError};
pub use runner::{run_model_parallel, simulate_many_parallel, ParallelBatchConfig};
