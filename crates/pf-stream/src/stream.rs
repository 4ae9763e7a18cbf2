//! Material streams.

use crate::error::{StreamError, StreamResult};
use crate::solve::solve_bracketed;
use crate::species_set::SpeciesSet;
use pf_core::units::{Pressure, Temperature, constants, k};
use pf_thermo::Phase;
use std::sync::Arc;
use tracing::debug;

/// Temperature tolerance of the mixing energy-balance solve (K).
const T_SOLVE_TOL: f64 = 1e-9;

/// A material stream: per-species molar flows plus shared T/P/phase state.
///
/// Flows are kmol/hr, indexed by position in the backing [`SpeciesSet`].
/// Bulk enthalpy is kJ/hr (J/mol × kmol/hr), mass is kg/hr (g/mol × kmol/hr).
#[derive(Debug, Clone)]
pub struct Stream {
    name: String,
    species: Arc<SpeciesSet>,
    mol: Vec<f64>,
    pub t: Temperature,
    pub p: Pressure,
    pub phase: Phase,
}

impl Stream {
    /// New empty stream at standard conditions (298.15 K, 101 325 Pa, liquid).
    pub fn new(name: impl Into<String>, species: Arc<SpeciesSet>) -> Self {
        let mol = vec![0.0; species.len()];
        Self {
            name: name.into(),
            species,
            mol,
            t: constants::t_standard(),
            p: constants::p_standard(),
            phase: Phase::Liquid,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> &Arc<SpeciesSet> {
        &self.species
    }

    /// Per-species molar flows (kmol/hr).
    pub fn mol(&self) -> &[f64] {
        &self.mol
    }

    pub fn mol_mut(&mut self) -> &mut [f64] {
        &mut self.mol
    }

    /// Replace the whole molar vector, length-checked.
    pub fn set_mol(&mut self, mol: &[f64]) -> StreamResult<()> {
        if mol.len() != self.mol.len() {
            return Err(StreamError::LengthMismatch {
                expected: self.mol.len(),
                got: mol.len(),
            });
        }
        self.mol.copy_from_slice(mol);
        Ok(())
    }

    /// Molar flow of one species by ID (kmol/hr).
    pub fn flow(&self, id: &str) -> StreamResult<f64> {
        Ok(self.mol[self.species.index_of(id)?])
    }

    /// Set the molar flow of one species by ID (kmol/hr).
    pub fn set_flow(&mut self, id: &str, kmol_per_hr: f64) -> StreamResult<()> {
        let idx = self.species.index_of(id)?;
        self.mol[idx] = kmol_per_hr;
        Ok(())
    }

    /// Total molar flow (kmol/hr).
    pub fn molnet(&self) -> f64 {
        self.mol.iter().sum()
    }

    /// Total mass flow (kg/hr).
    pub fn massnet(&self) -> f64 {
        self.species
            .iter()
            .zip(&self.mol)
            .map(|(c, mol)| c.mw() * mol)
            .sum()
    }

    /// Mass flow of one species by ID (kg/hr).
    pub fn mass_flow(&self, id: &str) -> StreamResult<f64> {
        let idx = self.species.index_of(id)?;
        Ok(self.species.get(idx).map(|c| c.mw()).unwrap_or(0.0) * self.mol[idx])
    }

    /// Bulk enthalpy at the stream state (kJ/hr).
    ///
    /// Species with zero flow contribute nothing and are not evaluated, so a
    /// species with no path to the stream phase only faults once it actually
    /// flows.
    pub fn enthalpy(&self) -> StreamResult<f64> {
        bulk_enthalpy(&self.species, &self.mol, self.t, self.phase)
    }

    /// Bulk entropy at the stream state (kJ/(K·hr)).
    pub fn entropy(&self) -> StreamResult<f64> {
        let mut total = 0.0;
        for (compound, &mol) in self.species.iter().zip(&self.mol) {
            if mol != 0.0 {
                total += mol * compound.entropy(self.t, self.p, self.phase)?;
            }
        }
        Ok(total)
    }

    /// Bulk heat of combustion (kJ/hr). Species without combustion data
    /// contribute nothing.
    pub fn heat_of_combustion(&self) -> f64 {
        self.species
            .iter()
            .zip(&self.mol)
            .map(|(c, mol)| c.heat_of_combustion().unwrap_or(0.0) * mol)
            .sum()
    }

    /// Copy composition and state from another stream over the same species
    /// set.
    pub fn copy_like(&mut self, other: &Stream) -> StreamResult<()> {
        if !Arc::ptr_eq(&self.species, &other.species) {
            return Err(StreamError::MismatchedSpecies);
        }
        self.mol.copy_from_slice(&other.mol);
        self.t = other.t;
        self.p = other.p;
        self.phase = other.phase;
        Ok(())
    }

    /// Energy-balanced mixing: `out` receives the elementwise molar sum of
    /// `ins`, adopts the first non-empty inlet's pressure and phase, and its
    /// temperature is solved so the outlet enthalpy equals the total inlet
    /// enthalpy.
    pub fn sum(out: &mut Stream, ins: &[&Stream]) -> StreamResult<()> {
        if ins.is_empty() {
            return Err(StreamError::InvalidArg {
                what: "mixing requires at least one inlet",
            });
        }
        for input in ins {
            if !Arc::ptr_eq(&out.species, &input.species) {
                return Err(StreamError::MismatchedSpecies);
            }
        }

        let n = out.mol.len();
        let mut mol = vec![0.0; n];
        for input in ins {
            for (acc, &m) in mol.iter_mut().zip(input.mol()) {
                *acc += m;
            }
        }

        let mut h_in = 0.0;
        for input in ins {
            h_in += input.enthalpy()?;
        }

        out.mol.copy_from_slice(&mol);
        if out.molnet() == 0.0 {
            out.t = ins[0].t;
            out.p = ins[0].p;
            out.phase = ins[0].phase;
            return Ok(());
        }

        let lead = ins
            .iter()
            .find(|s| s.molnet() > 0.0)
            .copied()
            .unwrap_or(ins[0]);
        out.p = lead.p;
        out.phase = lead.phase;

        let t_lo = ins.iter().map(|s| s.t.value).fold(f64::INFINITY, f64::min) - 1.0;
        let t_hi = ins
            .iter()
            .map(|s| s.t.value)
            .fold(f64::NEG_INFINITY, f64::max)
            + 1.0;

        let species = out.species.clone();
        let phase = out.phase;
        let residual =
            |t: f64| -> StreamResult<f64> { Ok(bulk_enthalpy(&species, &mol, k(t), phase)? - h_in) };
        let t_out = solve_bracketed(residual, t_lo, t_hi, T_SOLVE_TOL, "mixing temperature")?;
        out.t = k(t_out);

        debug!(
            out = %out.name,
            inlets = ins.len(),
            t_out,
            "energy-balanced mix"
        );
        Ok(())
    }
}

fn bulk_enthalpy(
    species: &SpeciesSet,
    mol: &[f64],
    t: Temperature,
    phase: Phase,
) -> StreamResult<f64> {
    let mut total = 0.0;
    for (compound, &m) in species.iter().zip(mol) {
        if m != 0.0 {
            total += m * compound.enthalpy(t, phase)?;
        }
    }
    Ok(total)
}

impl Stream {
    /// Convenience constructor: a stream with named flows (kmol/hr) at the
    /// given temperature.
    pub fn with_flows(
        name: impl Into<String>,
        species: Arc<SpeciesSet>,
        flows: &[(&str, f64)],
        t: Temperature,
    ) -> StreamResult<Self> {
        let mut stream = Stream::new(name, species);
        for (id, amount) in flows {
            stream.set_flow(id, *amount)?;
        }
        stream.t = t;
        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pf_thermo::species;

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
    fn mass_from_molar_flows() {
        let set = water_ethanol();
        let mut s = Stream::new("feed", set);
        s.set_flow("Water", 2.0).unwrap();
        assert_relative_eq!(s.massnet(), 2.0 * 18.01528, max_relative = 1e-12);
        assert_relative_eq!(
            s.mass_flow("Water").unwrap(),
            2.0 * 18.01528,
            max_relative = 1e-12
        );
    }

    #[test]
    fn heat_of_combustion_skips_species_without_data() {
        let set = water_ethanol();
        let mut s = Stream::new("feed", set);
        s.set_flow("Water", 5.0).unwrap();
        s.set_flow("Ethanol", 1.0).unwrap();
        // Water has no Hc; only ethanol contributes.
        assert_relative_eq!(s.heat_of_combustion(), 1_366_800.0, max_relative = 1e-12);
    }

    #[test]
    fn bulk_entropy_scales_with_flow() {
        let set = water_ethanol();
        let mut s = Stream::new("feed", set);
        s.set_flow("Water", 3.0).unwrap();
        s.t = k(350.0);
        let per_mol = 75.31 * (350.0_f64 / 298.15).ln();
        assert_relative_eq!(s.entropy().unwrap(), 3.0 * per_mol, max_relative = 1e-12);
    }

    #[test]
    fn unknown_species_flow_is_an_error() {
        let set = water_ethanol();
        let s = Stream::new("feed", set);
        assert!(matches!(
            s.flow("Benzene").unwrap_err(),
            StreamError::UnknownSpecies { .. }
        ));
    }

    #[test]
    fn set_mol_is_length_checked() {
        let set = water_ethanol();
        let mut s = Stream::new("feed", set);
        let err = s.set_mol(&[1.0]).unwrap_err();
        assert!(matches!(err, StreamError::LengthMismatch { .. }));
    }

    #[test]
    fn mix_of_equal_flows_lands_at_the_mean_temperature() {
        let set = water_ethanol();
        let hot = Stream::with_flows("hot", set.clone(), &[("Water", 10.0)], k(350.0)).unwrap();
        let cold = Stream::with_flows("cold", set.clone(), &[("Water", 10.0)], k(300.0)).unwrap();
        let mut out = Stream::new("mix", set);

        Stream::sum(&mut out, &[&hot, &cold]).unwrap();
        assert_relative_eq!(out.t.value, 325.0, epsilon = 1e-6);
        assert_relative_eq!(out.mol()[0], 20.0, max_relative = 1e-12);
    }

    #[test]
    fn mix_conserves_bulk_enthalpy() {
        let set = water_ethanol();
        let a = Stream::with_flows("a", set.clone(), &[("Water", 20.0)], k(340.0)).unwrap();
        let b =
            Stream::with_flows("b", set.clone(), &[("Ethanol", 10.0)], k(300.0)).unwrap();
        let mut out = Stream::new("mix", set);

        Stream::sum(&mut out, &[&a, &b]).unwrap();
        let h_in = a.enthalpy().unwrap() + b.enthalpy().unwrap();
        assert_relative_eq!(out.enthalpy().unwrap(), h_in, epsilon = 1e-3);
    }

    #[test]
    fn mixing_empty_inlets_keeps_the_first_inlet_state() {
        let set = water_ethanol();
        let a = Stream::new("a", set.clone());
        let b = Stream::new("b", set.clone());
        let mut out = Stream::new("mix", set);
        Stream::sum(&mut out, &[&a, &b]).unwrap();
        assert_eq!(out.t.value, a.t.value);
        assert_eq!(out.molnet(), 0.0);
    }

    #[test]
    fn copy_like_requires_the_same_species_set() {
        let set_a = water_ethanol();
        let set_b = water_ethanol();
        let a = Stream::new("a", set_a.clone());
        let mut b = Stream::new("b", set_b);
        assert!(matches!(
            b.copy_like(&a).unwrap_err(),
            StreamError::MismatchedSpecies
        ));
        let mut c = Stream::new("c", set_a);
        assert!(c.copy_like(&a).is_ok());
    }
}
