//! Physical phase of a pure species.

use crate::error::{ThermoError, ThermoResult};
use core::fmt;

/// Phase of a pure species in a stream context.
///
/// The closed enum makes unrepresentable the "unrecognized phase pair"
/// failure mode of string-keyed phase dispatch: every `(reference, current)`
/// combination has a defined property path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Solid,
    Liquid,
    Gas,
}

impl Phase {
    /// Conventional one-letter symbol: 's', 'l', or 'g'.
    pub fn symbol(&self) -> char {
        match self {
            Phase::Solid => 's',
            Phase::Liquid => 'l',
            Phase::Gas => 'g',
        }
    }

    /// Whether entropy is pressure-sensitive in this phase.
    ///
    /// Liquids and gases carry the `-R ln(P/P_ref)` correction; solids do not.
    pub fn is_fluid(&self) -> bool {
        matches!(self, Phase::Liquid | Phase::Gas)
    }
}

impl TryFrom<char> for Phase {
    type Error = ThermoError;

    fn try_from(c: char) -> ThermoResult<Self> {
        match c.to_ascii_lowercase() {
            's' => Ok(Phase::Solid),
            'l' => Ok(Phase::Liquid),
            'g' => Ok(Phase::Gas),
            other => Err(ThermoError::UnknownPhase {
                symbol: other.to_string(),
            }),
        }
    }
}

impl std::str::FromStr for Phase {
    type Err = ThermoError;

    fn from_str(s: &str) -> ThermoResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "solid" => Ok(Phase::Solid),
            "l" | "liquid" => Ok(Phase::Liquid),
            "g" | "gas" | "vapor" => Ok(Phase::Gas),
            other => Err(ThermoError::UnknownPhase {
                symbol: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
