//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered during a closed-loop run.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Controller error: {0}")]
    Control(#[from] tl_controls::ControlError),

    #[error("Plant error: {0}")]
    Plant(#[from] tl_plant::PlantError),

    #[error("Output error: {message}")]
    Output { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Output {
            message: e.to_string(),
        }
    }
}
