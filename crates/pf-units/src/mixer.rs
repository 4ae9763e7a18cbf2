//! Mixer unit.

use crate::error::{UnitError, UnitResult};
use crate::unit::{FlowUnit, StreamPool};
use pf_core::StreamId;
use pf_stream::Stream;

/// Mixes any number of inlet streams into one outlet.
///
/// Outlet molar flows are the elementwise sum; the outlet temperature comes
/// from the stream summation primitive's energy balance (bulk enthalpy
/// conserved at the outlet composition).
#[derive(Debug)]
pub struct Mixer {
    name: String,
    ins: Vec<StreamId>,
    outs: [StreamId; 1],
}

impl Mixer {
    pub fn new(name: impl Into<String>, ins: Vec<StreamId>, out: StreamId) -> UnitResult<Self> {
        if ins.is_empty() {
            return Err(UnitError::InvalidArg {
                what: "mixer requires at least one inlet",
            });
        }
        Ok(Self {
            name: name.into(),
            ins,
            outs: [out],
        })
    }
}

impl FlowUnit for Mixer {
    fn name(&self) -> &str {
        &self.name
    }

    fn ins(&self) -> &[StreamId] {
        &self.ins
    }

    fn outs(&self) -> &[StreamId] {
        &self.outs
    }

    fn run(&mut self, streams: &mut StreamPool) -> UnitResult<()> {
        // Snapshot the inlets so the outlet can be borrowed mutably.
        let ins: Vec<Stream> = self
            .ins
            .iter()
            .map(|&id| streams.get(id).cloned())
            .collect::<UnitResult<_>>()?;
        let refs: Vec<&Stream> = ins.iter().collect();
        let out = streams.get_mut(self.outs[0])?;
        Stream::sum(out, &refs)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pf_core::units::k;
    use pf_stream::SpeciesSet;
    use pf_thermo::species;
    use std::sync::Arc;

    fn water_ethanol() -> Arc<SpeciesSet> {
        Arc::new(
            SpeciesSet::from_models([
                species::water().build().unwrap(),
                species::ethanol().build().unwrap(),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn mixer_sums_flows_and_balances_energy() {
        let set = water_ethanol();
        let mut pool = StreamPool::new();
        let s1 =
            pool.add(Stream::with_flows("s1", set.clone(), &[("Water", 20.0)], k(340.0)).unwrap());
        let s2 = pool
            .add(Stream::with_flows("s2", set.clone(), &[("Ethanol", 10.0)], k(300.0)).unwrap());
        let s3 = pool.add(
            Stream::with_flows("s3", set.clone(), &[("Water", 3.0), ("Ethanol", 4.0)], k(298.15))
                .unwrap(),
        );
        let out = pool.add(Stream::new("s4", set));

        let mut mixer = Mixer::new("M1", vec![s1, s2, s3], out).unwrap();
        mixer.run(&mut pool).unwrap();

        let mixed = pool.get(out).unwrap();
        assert_relative_eq!(mixed.mol()[0], 23.0, max_relative = 1e-12);
        assert_relative_eq!(mixed.mol()[1], 14.0, max_relative = 1e-12);
        // Hot water dominates: the outlet lands between the extremes.
        assert!(mixed.t.value > 298.15 && mixed.t.value < 340.0);
    }

    #[test]
    fn mixer_requires_an_inlet() {
        let set = water_ethanol();
        let mut pool = StreamPool::new();
        let out = pool.add(Stream::new("out", set));
        assert!(Mixer::new("M1", vec![], out).is_err());
    }
}
