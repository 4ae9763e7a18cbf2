//! pf-stream: material streams over shared property models.
//!
//! A [`Stream`] is an ordered vector of per-species molar flows (kmol/hr)
//! plus the T/P/phase state shared by every species in it. Bulk properties
//! (mass, enthalpy, heat of combustion) are sums over the per-species
//! property models of its [`SpeciesSet`].
//!
//! [`Stream::sum`] is the energy-balanced mixing primitive: molar flows add
//! elementwise and the outlet temperature is solved so the outlet enthalpy
//! equals the total inlet enthalpy.

pub mod error;
pub mod species_set;
pub mod stream;

pub(crate) mod solve;

pub use error::{StreamError, StreamResult};
pub use species_set::SpeciesSet;
pub use stream::Stream;
