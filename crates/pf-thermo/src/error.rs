//! Thermodynamic property errors.

use crate::phase::Phase;
use pf_core::PfError;
use thiserror::Error;

/// Result type for property-model operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors that can occur while building or evaluating a property model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// Unrecognized integration scheme name.
    #[error(
        "Unknown integration scheme '{name}': expected one of 'rigorous', 'average', 'constant'"
    )]
    UnknownScheme { name: String },

    /// Unrecognized phase symbol.
    #[error("Unknown phase '{symbol}': expected one of 's', 'l', 'g'")]
    UnknownPhase { symbol: String },

    /// Correlation data required for a phase transition was never supplied.
    ///
    /// Raised loudly whenever an enthalpy/entropy path crosses a boundary
    /// whose transition temperature, latent heat, or heat capacity is
    /// missing. Never defaults to zero.
    #[error("Compound '{id}': missing {what} required for the {transition} transition")]
    MissingData {
        id: String,
        what: &'static str,
        transition: &'static str,
    },

    /// No heat capacity available for the phase being integrated.
    #[error("Compound '{id}': no heat capacity for the {phase} phase")]
    MissingHeatCapacity { id: String, phase: Phase },

    /// Physically inconsistent input data.
    #[error("Compound '{id}': {what}")]
    NonPhysical { id: String, what: &'static str },
}

impl From<ThermoError> for PfError {
    fn from(err: ThermoError) -> Self {
        match err {
            ThermoError::UnknownScheme { .. } | ThermoError::UnknownPhase { .. } => {
                PfError::InvalidArg {
                    what: "unrecognized property-model configuration",
                }
            }
            ThermoError::MissingData { .. } | ThermoError::MissingHeatCapacity { .. } => {
                PfError::Invariant {
                    what: "missing correlation data for requested phase path",
                }
            }
            ThermoError::NonPhysical { .. } => PfError::InvalidArg {
                what: "non-physical compound data",
            },
        }
    }
}
