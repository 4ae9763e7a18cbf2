//! Heat-capacity integration schemes.

use crate::error::{ThermoError, ThermoResult};
use pf_core::units::constants::T_STANDARD_K;

/// Panel count for the rigorous composite-Simpson quadrature.
///
/// Heat-capacity correlations are smooth low-order polynomials, so a modest
/// fixed panel count reproduces them to well below correlation accuracy.
const SIMPSON_PANELS: usize = 128;

/// Rigor of the heat-capacity integral used for enthalpy evaluation.
///
/// Selected per property model at build time; two models with different
/// schemes coexist without interference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrationScheme {
    /// Composite Simpson quadrature of the Cp curve over the interval.
    /// Most accurate, most expensive.
    Rigorous,
    /// One Cp evaluation at the interval midpoint times the width.
    /// O(1) cost, first-order accurate. The default.
    #[default]
    Average,
    /// One Cp evaluation at 298.15 K regardless of the interval, times the
    /// width. Cheapest, least accurate away from the reference.
    Constant,
}

impl IntegrationScheme {
    /// Canonical name, as accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            IntegrationScheme::Rigorous => "rigorous",
            IntegrationScheme::Average => "average",
            IntegrationScheme::Constant => "constant",
        }
    }

    /// Directed integral of `cp` from `t0` to `t1` (J/mol).
    ///
    /// `t1 < t0` yields the negated integral, so downward phase paths fall
    /// out of the same formula.
    pub fn integrate<F>(&self, cp: F, t0: f64, t1: f64) -> f64
    where
        F: Fn(f64) -> f64,
    {
        match self {
            IntegrationScheme::Rigorous => simpson(&cp, t0, t1),
            IntegrationScheme::Average => cp((t0 + t1) / 2.0) * (t1 - t0),
            IntegrationScheme::Constant => cp(T_STANDARD_K) * (t1 - t0),
        }
    }
}

impl std::str::FromStr for IntegrationScheme {
    type Err = ThermoError;

    fn from_str(s: &str) -> ThermoResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rigorous" => Ok(IntegrationScheme::Rigorous),
            "average" => Ok(IntegrationScheme::Average),
            "constant" => Ok(IntegrationScheme::Constant),
            other => Err(ThermoError::UnknownScheme {
                name: other.to_string(),
            }),
        }
    }
}

/// Composite Simpson rule with a fixed even panel count.
///
/// A negative interval (`t1 < t0`) gives a negative step and therefore the
/// negated integral, matching the directed-integral convention.
fn simpson<F>(f: &F, t0: f64, t1: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    if t0 == t1 {
        return 0.0;
    }
    let n = SIMPSON_PANELS;
    let h = (t1 - t0) / n as f64;
    let mut acc = f(t0) + f(t1);
    for i in 1..n {
        let t = t0 + h * i as f64;
        let w = if i % 2 == 0 { 2.0 } else { 4.0 };
        acc += w * f(t);
    }
    acc * h / 3.0
}
