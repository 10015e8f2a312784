//! Error types for plant construction.

use thiserror::Error;

/// Errors encountered while building a plant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlantError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type PlantResult<T> = Result<T, PlantError>;

impl From<tl_core::TlError> for PlantError {
    fn from(e: tl_core::TlError) -> Self {
        PlantError::Backend {
            message: e.to_string(),
        }
    }
}
