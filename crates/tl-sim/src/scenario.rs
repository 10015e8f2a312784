//! Reference closed-loop scenario.
//!
//! Defaults reproduce the classic demo: a PID controller tuned from a
//! critical gain of 14 and a critical period of 230 ticks, driving a
//! ten-layer diffusion body (rate 0.1, all layers at zero) toward a
//! set-point of 1 for 1000 ticks.

use serde::{Deserialize, Serialize};
use tl_controls::{ControlMode, PidController};
use tl_core::{Real, TickClock};
use tl_plant::DiffusionBody;
use tl_plant::diffusion::{DEFAULT_DIFFUSION_RATE, DEFAULT_LAYER_COUNT};

use crate::closed_loop::{LoopOptions, LoopRecord, run_loop};
use crate::error::SimResult;

/// Full description of a closed-loop run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub kp_critical: Real,
    pub t_critical: Real,
    pub mode: ControlMode,
    pub layer_count: usize,
    pub diffusion_rate: Real,
    pub options: LoopOptions,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            kp_critical: 14.0,
            t_critical: 230.0,
            mode: ControlMode::Pid,
            layer_count: DEFAULT_LAYER_COUNT,
            diffusion_rate: DEFAULT_DIFFUSION_RATE,
            options: LoopOptions::default(),
        }
    }
}

impl Scenario {
    /// Build a fresh controller, plant and tick clock, then run the loop.
    pub fn run(&self) -> SimResult<LoopRecord> {
        let mut plant = DiffusionBody::new(self.layer_count, self.diffusion_rate)?;
        let clock = TickClock::new();
        let mut controller =
            PidController::with_mode(self.kp_critical, self.t_critical, clock.clone(), self.mode);
        run_loop(&mut controller, &mut plant, &clock, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn default_matches_reference_demo() {
        let s = Scenario::default();
        assert_eq!(s.kp_critical, 14.0);
        assert_eq!(s.t_critical, 230.0);
        assert_eq!(s.mode, ControlMode::Pid);
        assert_eq!(s.layer_count, 10);
        assert_eq!(s.diffusion_rate, 0.1);
        assert_eq!(s.options.ticks, 1000);
        assert_eq!(s.options.setpoint, 1.0);
    }

    #[test]
    fn invalid_plant_surfaces_as_plant_error() {
        let s = Scenario {
            layer_count: 1,
            ..Scenario::default()
        };
        assert!(matches!(s.run(), Err(SimError::Plant(_))));
    }

    #[test]
    fn scenario_serializes_mode_by_name() {
        let json = serde_json::to_string(&Scenario::default()).unwrap();
        assert!(json.contains("\"mode\":\"PID\""));
    }
}
