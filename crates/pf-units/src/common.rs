//! Common helpers for unit calculations.

use crate::error::{UnitError, UnitResult};
use pf_core::numeric::ensure_finite;

/// Ensure a value is finite, returning UnitError if not.
pub fn check_finite(value: f64, what: &'static str) -> UnitResult<()> {
    ensure_finite(value, what).map_err(|_| UnitError::NonPhysical { what })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }
}
