//! Bracketed scalar solve for the mixing temperature.

use crate::error::{StreamError, StreamResult};
use pf_core::numeric::{Tolerances, nearly_equal};
use tracing::trace;

/// Hard limits on the temperature bracket (K). Expansion never leaves them.
const T_MIN: f64 = 1.0;
const T_MAX: f64 = 6000.0;

const MAX_EXPANSIONS: usize = 60;
const MAX_BISECTIONS: usize = 200;

/// Find `t` with `f(t) = 0` by bracket expansion followed by bisection.
///
/// `f` must be monotone over the bracket (enthalpy in temperature is, for
/// positive heat capacities). The residual callback is fallible because
/// property evaluation underneath can fail; such errors abort the solve.
pub(crate) fn solve_bracketed<F>(
    f: F,
    lo0: f64,
    hi0: f64,
    tol: f64,
    what: &'static str,
) -> StreamResult<f64>
where
    F: Fn(f64) -> StreamResult<f64>,
{
    let mut lo = lo0.max(T_MIN);
    let mut hi = hi0.min(T_MAX);
    if lo >= hi {
        return Err(StreamError::InvalidArg {
            what: "solve bracket is empty",
        });
    }

    let mut f_lo = f(lo)?;
    let mut f_hi = f(hi)?;
    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }

    // Grow the bracket geometrically until the root is inside it.
    let mut expansions = 0;
    while f_lo.signum() == f_hi.signum() {
        if expansions >= MAX_EXPANSIONS || (lo == T_MIN && hi == T_MAX) {
            return Err(StreamError::ConvergenceFailed { what });
        }
        let width = hi - lo;
        lo = (lo - width).max(T_MIN);
        hi = (hi + width).min(T_MAX);
        f_lo = f(lo)?;
        f_hi = f(hi)?;
        expansions += 1;
    }
    trace!(lo, hi, expansions, "bracketed root");

    let done = Tolerances { abs: tol, rel: 0.0 };
    for _ in 0..MAX_BISECTIONS {
        let mid = 0.5 * (lo + hi);
        if nearly_equal(lo, hi, done) {
            return Ok(mid);
        }
        let f_mid = f(mid)?;
        if f_mid == 0.0 {
            return Ok(mid);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    Err(StreamError::ConvergenceFailed { what })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn finds_a_linear_root() {
        let root = solve_bracketed(|t| Ok(t - 325.0), 300.0, 350.0, 1e-9, "test").unwrap();
        assert_relative_eq!(root, 325.0, epsilon = 1e-8);
    }

    #[test]
    fn expands_the_bracket_when_the_root_lies_outside() {
        let root = solve_bracketed(|t| Ok(t - 800.0), 300.0, 350.0, 1e-9, "test").unwrap();
        assert_relative_eq!(root, 800.0, epsilon = 1e-6);
    }

    #[test]
    fn reports_failure_when_no_root_exists() {
        let err = solve_bracketed(|_| Ok(1.0), 300.0, 350.0, 1e-9, "test").unwrap_err();
        assert!(matches!(err, StreamError::ConvergenceFailed { .. }));
    }

    #[test]
    fn propagates_callback_errors() {
        let err = solve_bracketed(
            |_| {
                Err(StreamError::InvalidArg {
                    what: "boom",
                })
            },
            300.0,
            350.0,
            1e-9,
            "test",
        )
        .unwrap_err();
        assert!(matches!(err, StreamError::InvalidArg { .. }));
    }
}
