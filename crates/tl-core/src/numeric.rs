use crate::{TlError, TlResult};

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute/relative closeness band for comparing trajectories.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerance {
    /// Band used when comparing reference trajectories.
    pub const TIGHT: Tolerance = Tolerance::new(1e-12, 1e-9);

    pub const fn new(abs: Real, rel: Real) -> Self {
        Self { abs, rel }
    }

    /// Check whether `a` and `b` lie within the absolute band, or within the
    /// relative band scaled by the larger magnitude.
    pub fn close(self, a: Real, b: Real) -> bool {
        let diff = (a - b).abs();
        diff <= self.abs || diff <= self.rel * a.abs().max(b.abs())
    }
}

/// Reject the first non-finite entry of `values`.
pub fn check_finite(values: &[Real], what: &'static str) -> TlResult<()> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(TlError::NonFinite { what, value }),
        None => Ok(()),
    }
}

/// Sum of a slice of values, left to right.
pub fn sum(values: &[Real]) -> Real {
    values.iter().fold(0.0, |acc, v| acc + v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tight_band() {
        let tol = Tolerance::TIGHT;
        assert!(tol.close(1.0, 1.0 + 1e-12));
        assert!(tol.close(0.0, 1e-13));
        assert!(!tol.close(1.0, 1.0 + 1e-6));
        assert!(tol.close(1e6, 1e6 + 1e-4));
    }

    #[test]
    fn check_finite_reports_offending_value() {
        assert_eq!(check_finite(&[0.0, -3.5], "layer"), Ok(()));
        let err = check_finite(&[1.0, Real::INFINITY, Real::NAN], "layer").unwrap_err();
        assert_eq!(
            err,
            TlError::NonFinite {
                what: "layer",
                value: Real::INFINITY
            }
        );
        assert!(err.to_string().contains("Non-finite"));
    }

    #[test]
    fn sum_keeps_duplicates() {
        assert_eq!(sum(&[0.5, 0.5, 0.5]), 1.5);
        assert_eq!(sum(&[]), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn close_is_symmetric(a in -1e6_f64..1e6, b in -1e6_f64..1e6) {
            let tol = Tolerance::TIGHT;
            prop_assert_eq!(tol.close(a, b), tol.close(b, a));
        }

        #[test]
        fn sum_matches_sequential_fold(values in prop::collection::vec(-1e3_f64..1e3, 0..32)) {
            let mut acc = 0.0_f64;
            for v in &values {
                acc += v;
            }
            prop_assert_eq!(sum(&values).to_bits(), acc.to_bits());
        }
    }
}
