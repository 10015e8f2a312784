//! Sampled PID controller.
//!
//! The controller is driven by three explicit operations:
//! - [`PidController::set_setpoint`] stores a new set-point and discards all
//!   sampled history
//! - [`PidController::record_measurement`] stores the latest plant
//!   measurement and takes one sample
//! - [`PidController::compute_output`] takes one sample with the stored
//!   measurement and returns the control output
//!
//! Sampling semantics:
//! - The first sample after construction or a set-point change seeds the
//!   state: error and timestamp are recorded, integral and differential
//!   start at zero
//! - A sample whose timestamp does not advance past the previous one is
//!   ignored, leaving state untouched
//! - Otherwise the integral grows by the trapezoid between the previous and
//!   current error, and the differential is the backward difference
//!
//! There is no anti-windup and no output clamping.

use std::fmt;

use serde::{Deserialize, Serialize};
use tl_core::{Real, Timer, WallClock};
use tracing::{debug, trace};

use crate::error::ControlResult;
use crate::mode::{ControlMode, Term, TuningGains};

/// Sampled controller state after at least one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Timestamp of the last accepted sample.
    pub time: Real,
    /// `setpoint - measurement` at the last accepted sample.
    pub error: Real,
    /// Trapezoidal accumulation of error over time.
    pub integral: Real,
    /// Backward-difference estimate of d(error)/dt.
    pub differential: Real,
}

impl Sample {
    fn seeded(time: Real, error: Real) -> Self {
        Self {
            time,
            error,
            integral: 0.0,
            differential: 0.0,
        }
    }
}

/// Controller state. `sample` is `None` until the first sample after
/// construction or a set-point change.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PidState {
    pub sample: Option<Sample>,
}

impl PidState {
    /// Check whether a sample has been taken since the last reset.
    pub fn is_seeded(&self) -> bool {
        self.sample.is_some()
    }

    /// Forget all sampled history.
    pub fn reset(&mut self) {
        self.sample = None;
    }
}

/// PID controller tuned from a critical gain and critical period.
///
/// # Example
///
/// ```
/// use tl_controls::PidController;
/// use tl_core::TickClock;
///
/// let clock = TickClock::new();
/// let mut pid = PidController::new(14.0, 230.0, clock.clone(), "PID").unwrap();
/// pid.set_setpoint(1.0);
///
/// clock.advance();
/// pid.record_measurement(0.0);
/// // First sample: only the proportional term is nonzero.
/// assert!((pid.compute_output() - 8.4).abs() < 1e-12);
/// ```
pub struct PidController<T = WallClock> {
    mode: ControlMode,
    gains: TuningGains,
    setpoint: Real,
    measurement: Option<Real>,
    state: PidState,
    timer: T,
}

impl<T: Timer> PidController<T> {
    /// Create a controller from a mode name.
    ///
    /// # Arguments
    ///
    /// * `kp_critical` - Critical (ultimate) gain
    /// * `t_critical` - Critical oscillation period
    /// * `timer` - Timestamp source read on every sample
    /// * `mode` - One of `P`, `PI`, `PD`, `PID`, `P_max`
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::InvalidMode`] for any other mode name.
    ///
    /// [`ControlError::InvalidMode`]: crate::ControlError::InvalidMode
    pub fn new(kp_critical: Real, t_critical: Real, timer: T, mode: &str) -> ControlResult<Self> {
        let mode: ControlMode = mode.parse()?;
        Ok(Self::with_mode(kp_critical, t_critical, timer, mode))
    }

    /// Create a controller from an already parsed mode.
    pub fn with_mode(kp_critical: Real, t_critical: Real, timer: T, mode: ControlMode) -> Self {
        let gains = mode.gains(kp_critical, t_critical);
        debug!(
            %mode,
            kp = gains.kp,
            ti = ?gains.ti,
            td = ?gains.td,
            "pid controller tuned"
        );
        Self {
            mode,
            gains,
            setpoint: 0.0,
            measurement: None,
            state: PidState::default(),
            timer,
        }
    }

    /// Store a new set-point.
    ///
    /// Always clears the sampled state, even when `value` equals the current
    /// set-point. The stored measurement is kept.
    pub fn set_setpoint(&mut self, value: Real) {
        debug!(setpoint = value, "set-point changed, sampled state cleared");
        self.setpoint = value;
        self.state.reset();
    }

    /// Store a measurement and take one sample.
    pub fn record_measurement(&mut self, value: Real) {
        self.measurement = Some(value);
        self.step();
    }

    /// Take one sample with the stored measurement and return the output.
    ///
    /// When no new time has elapsed the sample is a no-op, so calling this
    /// right after [`record_measurement`](Self::record_measurement) does not
    /// double count. Returns `0.0` if no measurement has ever been recorded.
    pub fn compute_output(&mut self) -> Real {
        self.step();
        let sum = self.contributions().fold(0.0, |acc, (_, value)| acc + value);
        self.gains.kp * sum
    }

    /// Per-term contributions to the output, before scaling by `K_p`.
    ///
    /// Yields one entry per active term, in the order P, I, D. Empty until
    /// the controller has been sampled. Does not sample.
    pub fn contributions(&self) -> impl Iterator<Item = (Term, Real)> + '_ {
        let sample = self.state.sample;
        self.mode.terms().iter().filter_map(move |&term| {
            let s = sample?;
            let value = match term {
                Term::Proportional => s.error,
                Term::Integral => (1.0 / self.gains.ti?) * s.integral,
                Term::Derivative => self.gains.td? * s.differential,
            };
            Some((term, value))
        })
    }

    fn step(&mut self) {
        let Some(measurement) = self.measurement else {
            return;
        };
        let error = self.setpoint - measurement;
        let now = self.timer.now();

        match self.state.sample.as_mut() {
            None => {
                trace!(time = now, error, "seeding pid state");
                self.state.sample = Some(Sample::seeded(now, error));
            }
            Some(prev) if now <= prev.time => {
                trace!(time = now, last = prev.time, "timestamp did not advance, sample ignored");
            }
            Some(prev) => {
                let dt = now - prev.time;
                prev.integral += (error + prev.error) / 2.0 * dt;
                prev.differential = (error - prev.error) / dt;
                prev.error = error;
                prev.time = now;
                trace!(
                    time = now,
                    error,
                    integral = prev.integral,
                    differential = prev.differential,
                    "pid sample"
                );
            }
        }
    }
}

impl<T> PidController<T> {
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn gains(&self) -> TuningGains {
        self.gains
    }

    pub fn setpoint(&self) -> Real {
        self.setpoint
    }

    /// Latest recorded measurement.
    pub fn measurement(&self) -> Option<Real> {
        self.measurement
    }

    pub fn state(&self) -> &PidState {
        &self.state
    }

    /// Error at the last accepted sample.
    pub fn error(&self) -> Option<Real> {
        self.state.sample.map(|s| s.error)
    }

    pub fn integral(&self) -> Option<Real> {
        self.state.sample.map(|s| s.integral)
    }

    pub fn differential(&self) -> Option<Real> {
        self.state.sample.map(|s| s.differential)
    }

    /// Timestamp of the last accepted sample.
    pub fn last_time(&self) -> Option<Real> {
        self.state.sample.map(|s| s.time)
    }
}

impl<T> fmt::Debug for PidController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PidController")
            .field("mode", &self.mode)
            .field("gains", &self.gains)
            .field("setpoint", &self.setpoint)
            .field("measurement", &self.measurement)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
