//! Unit-operation errors.

use pf_core::PfError;
use pf_stream::StreamError;
use thiserror::Error;

/// Result type for unit operations.
pub type UnitResult<T> = Result<T, UnitError>;

/// Errors that can occur while running or designing units.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// A record was queried for a field that was never produced, signaling
    /// that an upstream unit never actually exchanged the named quantity.
    #[error("Empty result: {what}")]
    EmptyResult { what: &'static str },

    /// Invalid unit configuration.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A stream ID not present in the network's stream pool.
    #[error("Unknown stream (index={index}, len={len})")]
    UnknownStream { index: usize, len: usize },

    /// Non-physical value produced or supplied.
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    /// Stream-level failure underneath a unit balance.
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl From<UnitError> for PfError {
    fn from(err: UnitError) -> Self {
        match err {
            UnitError::EmptyResult { what } => PfError::Invariant { what },
            UnitError::InvalidArg { what } => PfError::InvalidArg { what },
            UnitError::UnknownStream { index, len } => PfError::IndexOob {
                what: "stream pool",
                index,
                len,
            },
            UnitError::NonPhysical { what } => PfError::InvalidArg { what },
            UnitError::Stream(inner) => inner.into(),
        }
    }
}
