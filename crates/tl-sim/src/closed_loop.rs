//! Closed-loop driver and result recording.

use serde::{Deserialize, Serialize};
use tl_controls::PidController;
use tl_core::{Real, TickClock, Timer};
use tl_plant::DiffusionBody;
use tracing::debug;

use crate::error::{SimError, SimResult};

/// Options for closed-loop runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoopOptions {
    /// Number of ticks to run
    pub ticks: usize,
    /// Set-point assigned before the first tick
    pub setpoint: Real,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            ticks: 1000,
            setpoint: 1.0,
        }
    }
}

/// Record of a closed-loop run, one entry per tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoopRecord {
    /// Tick number after advancing the clock (starts at 1)
    pub ticks: Vec<u64>,
    /// Plant output fed to the controller on that tick
    pub measurements: Vec<Real>,
    /// Controller output fed back into the plant on that tick
    pub outputs: Vec<Real>,
}

impl LoopRecord {
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// `(tick, measurement)` pairs in tick order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, Real)> + '_ {
        self.ticks
            .iter()
            .copied()
            .zip(self.measurements.iter().copied())
    }

    /// Last recorded measurement.
    pub fn final_value(&self) -> Option<Real> {
        self.measurements.last().copied()
    }

    /// Check whether the last `window` measurements all lie within `band`
    /// of `target`. False if fewer than `window` ticks were recorded.
    pub fn settled_within(&self, target: Real, band: Real, window: usize) -> bool {
        if window == 0 || self.measurements.len() < window {
            return false;
        }
        self.measurements[self.measurements.len() - window..]
            .iter()
            .all(|m| (m - target).abs() <= band)
    }
}

/// Run the controller against the plant for `opts.ticks` ticks.
///
/// Each tick advances `clock` by one, feeds the plant output to the
/// controller, then feeds the controller output back into the plant. The
/// controller is expected to read its timestamps from `clock` (or a clone
/// of it); any other timer works but decouples the run from tick numbers.
pub fn run_loop<T: Timer>(
    controller: &mut PidController<T>,
    plant: &mut DiffusionBody,
    clock: &TickClock,
    opts: &LoopOptions,
) -> SimResult<LoopRecord> {
    if opts.ticks == 0 {
        return Err(SimError::InvalidArg {
            what: "ticks must be positive",
        });
    }

    controller.set_setpoint(opts.setpoint);

    let mut record = LoopRecord {
        ticks: Vec::with_capacity(opts.ticks),
        measurements: Vec::with_capacity(opts.ticks),
        outputs: Vec::with_capacity(opts.ticks),
    };

    for _ in 0..opts.ticks {
        let tick = clock.advance();
        let measured = plant.right_value();
        controller.record_measurement(measured);
        let output = controller.compute_output();
        plant.update(output);

        record.ticks.push(tick);
        record.measurements.push(measured);
        record.outputs.push(output);
    }

    debug!(
        ticks = opts.ticks,
        clock = clock.ticks(),
        mode = %controller.mode(),
        final_value = ?record.final_value(),
        "closed loop finished"
    );

    Ok(record)
}
