//! Timestamp sources for sampled controllers.
//!
//! Controllers never read a global clock. Every controller is handed a
//! [`Timer`] at construction and asks it for the current timestamp each time
//! it samples. Timestamps are plain [`Real`] values and are expected to be
//! non-decreasing; a source that repeats or goes backwards is tolerated by
//! the consumer, not rejected here.
//!
//! Provided sources:
//! - any `FnMut() -> Real` closure
//! - [`TickClock`]: a shared counter advanced by the driver loop
//! - [`ScriptedTimer`]: replays a fixed timestamp sequence (tests)
//! - [`WallClock`]: seconds elapsed since creation

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::numeric::Real;

/// Source of timestamps for a sampled controller.
pub trait Timer {
    /// Current timestamp.
    fn now(&mut self) -> Real;
}

impl<F> Timer for F
where
    F: FnMut() -> Real,
{
    fn now(&mut self) -> Real {
        self()
    }
}

/// Discrete tick counter shared between a driver and the controllers it feeds.
///
/// Clones share the same counter: the driver keeps one handle and advances
/// it, the controller holds another and reads it.
///
/// ```
/// use tl_core::{TickClock, Timer};
///
/// let driver = TickClock::new();
/// let mut reader = driver.clone();
/// driver.advance();
/// driver.advance();
/// assert_eq!(reader.now(), 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TickClock {
    ticks: Rc<Cell<u64>>,
}

impl TickClock {
    /// Create a clock at tick zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick and return the new tick count.
    pub fn advance(&self) -> u64 {
        let next = self.ticks.get() + 1;
        self.ticks.set(next);
        next
    }

    /// Current tick count.
    pub fn ticks(&self) -> u64 {
        self.ticks.get()
    }
}

impl Timer for TickClock {
    fn now(&mut self) -> Real {
        self.ticks.get() as Real
    }
}

/// Replays a fixed sequence of timestamps.
///
/// Once the script runs out the last timestamp is repeated, so further
/// samples never see time advance.
#[derive(Debug, Clone)]
pub struct ScriptedTimer {
    script: Vec<Real>,
    cursor: usize,
}

impl ScriptedTimer {
    pub fn new(script: impl IntoIterator<Item = Real>) -> Self {
        Self {
            script: script.into_iter().collect(),
            cursor: 0,
        }
    }
}

impl Timer for ScriptedTimer {
    fn now(&mut self) -> Real {
        let Some(last) = self.script.len().checked_sub(1) else {
            return 0.0;
        };
        let value = self.script[self.cursor.min(last)];
        self.cursor += 1;
        value
    }
}

/// Seconds elapsed since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for WallClock {
    fn now(&mut self) -> Real {
        self.origin.elapsed().as_secs_f64()
    }
}
