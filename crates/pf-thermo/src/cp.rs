//! Molar heat-capacity slots.

use core::fmt;
use std::sync::Arc;

/// A molar heat capacity for one phase (J/(mol·K)).
///
/// Either a constant or an arbitrary function of temperature, dispatched
/// explicitly. Replaces dynamic accessor injection: a builder captures one
/// of these per phase slot and evaluation stays a plain match.
#[derive(Clone)]
pub enum HeatCapacity {
    /// Temperature-independent value.
    Constant(f64),
    /// Correlation evaluated at the query temperature (K).
    OfT(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl HeatCapacity {
    /// Wrap a temperature-dependent correlation.
    pub fn of_t<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        HeatCapacity::OfT(Arc::new(f))
    }

    /// Evaluate at temperature `t` (K).
    pub fn eval(&self, t: f64) -> f64 {
        match self {
            HeatCapacity::Constant(v) => *v,
            HeatCapacity::OfT(f) => f(t),
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, HeatCapacity::Constant(_))
    }
}

impl From<f64> for HeatCapacity {
    fn from(v: f64) -> Self {
        HeatCapacity::Constant(v)
    }
}

impl fmt::Debug for HeatCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeatCapacity::Constant(v) => write!(f, "HeatCapacity::Constant({v})"),
            HeatCapacity::OfT(_) => write!(f, "HeatCapacity::OfT(..)"),
        }
    }
}
