//! Sampled PID control for thermoloop.
//!
//! The controller samples a measured process variable against a set-point
//! and combines proportional, integral and derivative terms into a single
//! control output.
//!
//! # Architecture
//!
//! - [`ControlMode`] selects the active terms and the classical tuning rule
//!   that turns a critical gain and period into controller gains
//! - [`PidController`] owns the gains, the set-point, the latest measurement
//!   and the sampled state, and reads time from an injected [`Timer`]
//! - Time is never read from a global clock, so a scripted timer makes every
//!   run reproducible
//!
//! [`Timer`]: tl_core::Timer

pub mod controller;
pub mod error;
pub mod mode;

pub use controller::{PidController, PidState, Sample};
pub use error::{ControlError, ControlResult};
pub use mode::{ControlMode, Term, TuningGains};
