//! tl-core: shared foundation for thermoloop.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - clock (injected timestamp sources for sampled controllers)
//! - error (shared error types)

pub mod clock;
pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use clock::{ScriptedTimer, TickClock, Timer, WallClock};
pub use error::{TlError, TlResult};
pub use numeric::*;
