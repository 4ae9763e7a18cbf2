//! Stream errors.

use pf_core::PfError;
use pf_thermo::ThermoError;
use thiserror::Error;

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors that can occur while manipulating streams.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StreamError {
    /// A species ID not present in the stream's species set.
    #[error("Unknown species '{id}'")]
    UnknownSpecies { id: String },

    /// A molar vector of the wrong length for the species set.
    #[error("Molar vector length mismatch (expected {expected}, got {got})")]
    LengthMismatch { expected: usize, got: usize },

    /// Streams backed by different species sets used together.
    #[error("Streams carry different species sets")]
    MismatchedSpecies,

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The energy-balance temperature solve failed to converge.
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: &'static str },

    /// Property-model failure underneath a bulk query.
    #[error(transparent)]
    Thermo(#[from] ThermoError),
}

impl From<StreamError> for PfError {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::UnknownSpecies { .. } | StreamError::InvalidArg { .. } => {
                PfError::InvalidArg {
                    what: "invalid stream argument",
                }
            }
            StreamError::LengthMismatch { .. } | StreamError::MismatchedSpecies => {
                PfError::Invariant {
                    what: "stream species-set mismatch",
                }
            }
            StreamError::ConvergenceFailed { what } => PfError::Invariant { what },
            StreamError::Thermo(inner) => inner.into(),
        }
    }
}
