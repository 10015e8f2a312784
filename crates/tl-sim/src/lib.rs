//! Closed-loop simulation of a PID controller against the diffusion plant.
//!
//! Provides:
//! - Tick-by-tick driver alternating plant observation and control action
//! - Recorded measurement/output history with settling checks
//! - Reference scenario mirroring the classic demo configuration

pub mod closed_loop;
pub mod error;
pub mod scenario;

// Re-exports for public API
pub use closed_loop::{LoopOptions, LoopRecord, run_loop};
pub use error::{SimError, SimResult};
pub use scenario::Scenario;
