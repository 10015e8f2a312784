//! Integration test: gains derived from the critical gain and period.

use tl_controls::{ControlError, ControlMode, PidController};
use tl_core::Tolerance;

fn close(a: f64, b: f64) -> bool {
    Tolerance::TIGHT.close(a, b)
}

#[test]
fn pid_gains_match_reference_values() {
    let pid = PidController::new(14.0, 230.0, || 0.0, "PID").unwrap();
    let g = pid.gains();
    assert!(close(g.kp, 8.4));
    assert_eq!(g.ti, Some(115.0));
    assert_eq!(g.td, Some(28.75));
    assert_eq!(pid.mode(), ControlMode::Pid);
}

#[test]
fn every_mode_follows_tuning_table() {
    let (kc, tc) = (10.0, 120.0);
    let cases = [
        ("PID", 6.0, Some(60.0), Some(15.0)),
        ("PI", 4.5, Some(100.0), None),
        ("PD", 8.0, None, Some(15.0)),
        ("P", 5.0, None, None),
        ("P_max", 10.0, None, None),
    ];
    for (name, kp, ti, td) in cases {
        let pid = PidController::new(kc, tc, || 0.0, name).unwrap();
        let g = pid.gains();
        assert!(close(g.kp, kp), "{name}: kp = {}", g.kp);
        match (g.ti, ti) {
            (Some(a), Some(b)) => assert!(close(a, b), "{name}: ti = {a}"),
            (a, b) => assert_eq!(a, b, "{name}: ti"),
        }
        assert_eq!(g.td, td, "{name}: td");
        assert_eq!(pid.mode().as_str(), name);
    }
}

#[test]
fn unknown_mode_is_rejected() {
    let err = PidController::new(14.0, 230.0, || 0.0, "XYZ").unwrap_err();
    assert_eq!(
        err,
        ControlError::InvalidMode {
            mode: "XYZ".to_string()
        }
    );
}

#[test]
fn rejected_mode_never_reads_the_timer() {
    let mut reads = 0;
    let result = PidController::new(
        14.0,
        230.0,
        || {
            reads += 1;
            0.0
        },
        "PIDD",
    );
    assert!(result.is_err());
    drop(result);
    assert_eq!(reads, 0);
}
