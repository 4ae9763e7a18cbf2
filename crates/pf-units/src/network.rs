//! The unit network: pooled streams plus units executed in order.

use crate::error::UnitResult;
use crate::power_utility::PowerUtility;
use crate::unit::{FlowUnit, PeerUtilities, StreamPool};
use pf_core::{StreamId, UnitId};
use pf_stream::Stream;
use tracing::debug;

/// A flow network: the stream pool and the units wired over it.
///
/// Units execute strictly sequentially in insertion order; imposing a
/// topological order on recycles is the orchestrating collaborator's
/// responsibility, not this core's.
#[derive(Default)]
pub struct UnitNetwork {
    streams: StreamPool,
    units: Vec<Box<dyn FlowUnit>>,
}

impl UnitNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stream(&mut self, stream: Stream) -> StreamId {
        self.streams.add(stream)
    }

    pub fn add_unit(&mut self, unit: Box<dyn FlowUnit>) -> UnitId {
        let id = UnitId::from_index(self.units.len() as u32);
        self.units.push(unit);
        id
    }

    pub fn stream(&self, id: StreamId) -> UnitResult<&Stream> {
        self.streams.get(id)
    }

    pub fn stream_mut(&mut self, id: StreamId) -> UnitResult<&mut Stream> {
        self.streams.get_mut(id)
    }

    pub fn streams(&self) -> &StreamPool {
        &self.streams
    }

    pub fn unit(&self, id: UnitId) -> Option<&dyn FlowUnit> {
        self.units.get(id.index() as usize).map(|u| u.as_ref())
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Box<dyn FlowUnit>> {
        self.units.get_mut(id.index() as usize)
    }

    pub fn units(&self) -> impl Iterator<Item = &dyn FlowUnit> {
        self.units.iter().map(|u| u.as_ref())
    }

    /// Run every unit's mass/energy balance, in insertion order.
    pub fn run_all(&mut self) -> UnitResult<()> {
        for unit in &mut self.units {
            debug!(unit = unit.name(), "run");
            unit.run(&mut self.streams)?;
        }
        Ok(())
    }

    /// Run every unit's design pass, in insertion order.
    ///
    /// Before each unit, the other units' heat-utility records are
    /// snapshotted into [`PeerUtilities`] so facilities can aggregate
    /// network-wide demand without aliasing the unit being designed.
    pub fn design_all(&mut self) -> UnitResult<()> {
        for i in 0..self.units.len() {
            let peers = PeerUtilities::new(
                self.units
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .flat_map(|(_, u)| u.heat_utilities().iter().cloned())
                    .collect(),
            );
            let unit = &mut self.units[i];
            debug!(unit = unit.name(), peers = peers.len(), "design");
            unit.design(&mut self.streams, &peers)?;
        }
        Ok(())
    }

    /// One full simulation pass: balances, then sizing, then the
    /// post-costing hooks (in that order — producers offset plant loads only
    /// after costing has consumed the raw values).
    pub fn simulate(&mut self) -> UnitResult<()> {
        self.run_all()?;
        self.design_all()?;
        for unit in &mut self.units {
            unit.end_costing();
        }
        Ok(())
    }

    /// Net electricity balance across all units.
    pub fn total_power(&self) -> PowerUtility {
        PowerUtility::sum(self.units.iter().filter_map(|u| u.power_utility()))
    }
}
