//! pf-units: flow units composed into a simulated network.
//!
//! Units implement [`FlowUnit`] and operate on streams owned by a
//! [`UnitNetwork`] stream pool, addressed by compact IDs. Execution is
//! strictly sequential in unit insertion order; topological ordering is the
//! orchestrator's responsibility.
//!
//! Combinator units ([`Mixer`], [`Splitter`], [`ReversedSplitter`]) preserve
//! mass and derive T/P/phase; the [`BoilerTurbogenerator`] facility
//! aggregates steam demand across the network and converts feed combustion
//! heat into steam and electricity.
//!
//! # Example
//!
//! ```
//! use pf_core::units::k;
//! use pf_stream::{SpeciesSet, Stream};
//! use pf_thermo::species;
//! use pf_units::{Mixer, UnitNetwork};
//! use std::sync::Arc;
//!
//! let set = Arc::new(SpeciesSet::from_models([species::water().build().unwrap()]).unwrap());
//! let mut net = UnitNetwork::new();
//! let hot = net
//!     .add_stream(Stream::with_flows("hot", set.clone(), &[("Water", 10.0)], k(350.0)).unwrap());
//! let cold = net
//!     .add_stream(Stream::with_flows("cold", set.clone(), &[("Water", 10.0)], k(300.0)).unwrap());
//! let mixed = net.add_stream(Stream::new("mixed", set));
//!
//! net.add_unit(Box::new(Mixer::new("M1", vec![hot, cold], mixed).unwrap()));
//! net.simulate().unwrap();
//!
//! // Equal flows of the same species land at the mean temperature.
//! assert!((net.stream(mixed).unwrap().t.value - 325.0).abs() < 1e-6);
//! ```

pub mod boiler_turbogenerator;
pub mod common;
pub mod design;
pub mod error;
pub mod heat_utility;
pub mod mixer;
pub mod network;
pub mod power_utility;
pub mod reversed_splitter;
pub mod splitter;
pub mod unit;

pub use boiler_turbogenerator::{BoilerTurbogenerator, CachedSteamDemand};
pub use design::DesignResults;
pub use error::{UnitError, UnitResult};
pub use heat_utility::{HeatUtility, UtilityKind};
pub use mixer::Mixer;
pub use network::UnitNetwork;
pub use power_utility::PowerUtility;
pub use reversed_splitter::ReversedSplitter;
pub use splitter::{Split, Splitter};
pub use unit::{FlowUnit, PeerUtilities, StreamPool};
