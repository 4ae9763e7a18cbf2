//! Core trait for flow units and the network-owned stream pool.

use crate::design::DesignResults;
use crate::error::{UnitError, UnitResult};
use crate::heat_utility::HeatUtility;
use crate::power_utility::PowerUtility;
use pf_core::StreamId;
use pf_stream::Stream;

/// Streams owned by the network, addressed by [`StreamId`].
///
/// Units never hold stream references, only IDs; this keeps the mutable
/// stream state in one place while units stay plain data.
#[derive(Debug, Default)]
pub struct StreamPool {
    streams: Vec<Stream>,
}

impl StreamPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, stream: Stream) -> StreamId {
        let id = StreamId::from_index(self.streams.len() as u32);
        self.streams.push(stream);
        id
    }

    pub fn get(&self, id: StreamId) -> UnitResult<&Stream> {
        let index = id.index() as usize;
        self.streams.get(index).ok_or(UnitError::UnknownStream {
            index,
            len: self.streams.len(),
        })
    }

    pub fn get_mut(&mut self, id: StreamId) -> UnitResult<&mut Stream> {
        let len = self.streams.len();
        let index = id.index() as usize;
        self.streams
            .get_mut(index)
            .ok_or(UnitError::UnknownStream { index, len })
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

/// Snapshot of the *other* units' heat-utility records, taken by the network
/// immediately before each unit's design pass. This is how a facility
/// discovers aggregate utility demand across the flow network.
#[derive(Debug, Default, Clone)]
pub struct PeerUtilities {
    records: Vec<HeatUtility>,
}

impl PeerUtilities {
    pub fn new(records: Vec<HeatUtility>) -> Self {
        Self { records }
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeatUtility> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A unit operation in the flow network.
///
/// Two lifecycle hooks per simulation pass: `run` computes the mass/energy
/// balance, `design` the sizing/energy results. `end_costing` fires once
/// after the costing phase so producers can offset plant-wide loads with
/// values the costing step already consumed.
pub trait FlowUnit {
    /// Unit name for identification and logging.
    fn name(&self) -> &str;

    /// Inlet stream IDs, in port order.
    fn ins(&self) -> &[StreamId];

    /// Outlet stream IDs, in port order.
    fn outs(&self) -> &[StreamId];

    /// Compute the unit's mass/energy balance on the pooled streams.
    fn run(&mut self, streams: &mut StreamPool) -> UnitResult<()>;

    /// Compute sizing/energy results. `peers` carries the other units'
    /// heat-utility records for network-wide aggregation.
    fn design(&mut self, _streams: &mut StreamPool, _peers: &PeerUtilities) -> UnitResult<()> {
        Ok(())
    }

    /// Heat-utility records owned by this unit.
    fn heat_utilities(&self) -> &[HeatUtility] {
        &[]
    }

    /// Electricity balance of this unit, if it has one.
    fn power_utility(&self) -> Option<&PowerUtility> {
        None
    }

    /// Computed sizing results, if the unit produces any.
    fn design_results(&self) -> Option<&DesignResults> {
        None
    }

    /// Hook invoked once after the costing phase.
    fn end_costing(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_stream::SpeciesSet;
    use pf_thermo::species;
    use std::sync::Arc;

    #[test]
    fn pool_add_and_lookup() {
        let set = Arc::new(SpeciesSet::from_models([species::water().build().unwrap()]).unwrap());
        let mut pool = StreamPool::new();
        let id = pool.add(Stream::new("s1", set));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(id).unwrap().name(), "s1");
    }

    #[test]
    fn pool_rejects_unknown_ids() {
        let pool = StreamPool::new();
        let err = pool.get(StreamId::from_index(3)).unwrap_err();
        assert!(matches!(err, UnitError::UnknownStream { index: 3, len: 0 }));
    }
}
