//! pf-thermo: pure-component thermodynamic property models.
//!
//! The central type is [`CompoundModel`]: per-species correlation data
//! (phase-transition temperatures, latent heats, heat-capacity slots) from
//! which enthalpy and entropy are evaluated relative to a reference state,
//! stitching integrals across every phase boundary crossed between the
//! reference phase and the queried phase.
//!
//! Integration rigor is a per-model choice ([`IntegrationScheme`]), fixed at
//! build time by [`CompoundBuilder`]. Models are immutable and `Arc`-shared;
//! per-stream mutable state lives in [`Compound`].
//!
//! # Example
//!
//! ```
//! use pf_core::units::{k, pa};
//! use pf_thermo::{Compound, IntegrationScheme, Phase, species};
//! use std::sync::Arc;
//!
//! let water = Arc::new(
//!     species::water()
//!         .scheme(IntegrationScheme::Rigorous)
//!         .build()
//!         .unwrap(),
//! );
//!
//! // Superheated steam relative to the liquid reference state.
//! let steam = Compound::at(water, k(400.0), pa(101_325.0), Phase::Gas);
//! assert!(steam.enthalpy().unwrap() > 40_000.0);
//! ```

pub mod builder;
pub mod compound;
pub mod cp;
pub mod error;
pub mod integrate;
pub mod phase;
pub mod species;

pub use builder::CompoundBuilder;
pub use compound::{Compound, CompoundModel, R, ReferenceState};
pub use cp::HeatCapacity;
pub use error::{ThermoError, ThermoResult};
pub use integrate::IntegrationScheme;
pub use phase::Phase;
