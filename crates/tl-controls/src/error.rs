//! Error types for control system operations.

use thiserror::Error;

/// Result type for control system operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur in control system operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Mode string does not name a known controller mode.
    #[error("Invalid controller mode: {mode:?} (expected one of P, PI, PD, PID, P_max)")]
    InvalidMode { mode: String },
}
