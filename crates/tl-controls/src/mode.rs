//! Controller modes and classical tuning.
//!
//! Each mode fixes two things at once: which terms contribute to the
//! control output, and which closed-loop tuning rule derives the gains from
//! the critical (ultimate) gain `K_p_critical` and critical oscillation
//! period `T_critical`:
//!
//! | mode    | K_p                 | T_i              | T_d            |
//! |---------|---------------------|------------------|----------------|
//! | `PID`   | 0.6 · K_p_critical  | T_critical / 2   | T_critical / 8 |
//! | `PI`    | 0.45 · K_p_critical | T_critical / 1.2 |                |
//! | `PD`    | 0.8 · K_p_critical  |                  | T_critical / 8 |
//! | `P`     | 0.5 · K_p_critical  |                  |                |
//! | `P_max` | K_p_critical        |                  |                |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tl_core::Real;

use crate::error::ControlError;

/// Term contributing to the control output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Contributes the current error.
    Proportional,
    /// Contributes the accumulated error divided by `T_i`.
    Integral,
    /// Contributes the error rate multiplied by `T_d`.
    Derivative,
}

/// Controller mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlMode {
    #[serde(rename = "P")]
    P,
    #[serde(rename = "PI")]
    Pi,
    #[serde(rename = "PD")]
    Pd,
    #[serde(rename = "PID")]
    Pid,
    /// Proportional only, at the full critical gain.
    #[serde(rename = "P_max")]
    PMax,
}

impl ControlMode {
    /// Every mode, in table order.
    pub const ALL: [ControlMode; 5] = [
        ControlMode::Pid,
        ControlMode::Pi,
        ControlMode::Pd,
        ControlMode::P,
        ControlMode::PMax,
    ];

    /// Canonical mode name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            ControlMode::P => "P",
            ControlMode::Pi => "PI",
            ControlMode::Pd => "PD",
            ControlMode::Pid => "PID",
            ControlMode::PMax => "P_max",
        }
    }

    /// Active terms, in summation order.
    pub fn terms(self) -> &'static [Term] {
        match self {
            ControlMode::P | ControlMode::PMax => &[Term::Proportional],
            ControlMode::Pi => &[Term::Proportional, Term::Integral],
            ControlMode::Pd => &[Term::Proportional, Term::Derivative],
            ControlMode::Pid => &[Term::Proportional, Term::Integral, Term::Derivative],
        }
    }

    /// Derive gains from the critical gain and critical period.
    pub fn gains(self, kp_critical: Real, t_critical: Real) -> TuningGains {
        match self {
            ControlMode::Pid => TuningGains {
                kp: 0.6 * kp_critical,
                ti: Some(t_critical / 2.0),
                td: Some(t_critical / 8.0),
            },
            ControlMode::Pi => TuningGains {
                kp: 0.45 * kp_critical,
                ti: Some(t_critical / 1.2),
                td: None,
            },
            ControlMode::Pd => TuningGains {
                kp: 0.8 * kp_critical,
                ti: None,
                td: Some(t_critical / 8.0),
            },
            ControlMode::P => TuningGains {
                kp: 0.5 * kp_critical,
                ti: None,
                td: None,
            },
            ControlMode::PMax => TuningGains {
                kp: kp_critical,
                ti: None,
                td: None,
            },
        }
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlMode {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P" => Ok(ControlMode::P),
            "PI" => Ok(ControlMode::Pi),
            "PD" => Ok(ControlMode::Pd),
            "PID" => Ok(ControlMode::Pid),
            "P_max" => Ok(ControlMode::PMax),
            other => Err(ControlError::InvalidMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// Controller gains derived from a tuning rule.
///
/// `ti` and `td` are `None` when the mode has no integral or derivative term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TuningGains {
    /// Proportional gain.
    pub kp: Real,
    /// Integral time.
    pub ti: Option<Real>,
    /// Derivative time.
    pub td: Option<Real>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_names() {
        for mode in ControlMode::ALL {
            assert_eq!(mode.as_str().parse::<ControlMode>().unwrap(), mode);
            assert_eq!(mode.to_string(), mode.as_str());
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("pid".parse::<ControlMode>().is_err());
        assert!("P_MAX".parse::<ControlMode>().is_err());
        assert!("".parse::<ControlMode>().is_err());
    }

    #[test]
    fn unknown_mode_names_the_input() {
        let err = "XYZ".parse::<ControlMode>().unwrap_err();
        assert_eq!(
            err,
            ControlError::InvalidMode {
                mode: "XYZ".to_string()
            }
        );
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn term_sets() {
        assert!(ControlMode::Pid.terms().contains(&Term::Derivative));
        assert!(!ControlMode::Pi.terms().contains(&Term::Derivative));
        assert!(!ControlMode::Pd.terms().contains(&Term::Integral));
        assert_eq!(ControlMode::PMax.terms(), &[Term::Proportional]);
        assert_eq!(ControlMode::P.terms(), &[Term::Proportional]);
    }

    #[test]
    fn unused_times_are_absent() {
        let g = ControlMode::Pd.gains(10.0, 80.0);
        assert_eq!(g.ti, None);
        assert_eq!(g.td, Some(10.0));
        let g = ControlMode::PMax.gains(10.0, 80.0);
        assert_eq!(g.kp, 10.0);
        assert_eq!((g.ti, g.td), (None, None));
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&ControlMode::PMax).unwrap();
        assert_eq!(json, "\"P_max\"");
        let mode: ControlMode = serde_json::from_str("\"PID\"").unwrap();
        assert_eq!(mode, ControlMode::Pid);
    }
}
