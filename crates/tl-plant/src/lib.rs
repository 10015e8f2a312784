//! Reference plant for exercising thermoloop controllers.
//!
//! Provides:
//! - Layered heat diffusion body driven at one end and observed at the other

pub mod diffusion;
pub mod error;

pub use diffusion::DiffusionBody;
pub use error::{PlantError, PlantResult};
