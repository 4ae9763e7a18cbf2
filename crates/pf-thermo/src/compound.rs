//! Pure-component enthalpy and entropy relative to a reference state.
//!
//! Every evaluation walks an ordered list of path segments between the
//! reference phase and the queried phase: sensible-heat integrals over
//! sub-ranges plus signed latent heats at each boundary crossed, in the
//! physically ordered sequence melt → vaporize. The path table is total over
//! the phase pair space, so misconfiguration surfaces as missing correlation
//! data, never as an unmatched branch.

use crate::cp::HeatCapacity;
use crate::error::{ThermoError, ThermoResult};
use crate::integrate::IntegrationScheme;
use crate::phase::Phase;
use pf_core::units::{Pressure, Temperature};
use std::sync::Arc;

/// Universal gas constant (J/(mol·K)).
pub const R: f64 = 8.3144598;

/// Reference state anchoring every enthalpy/entropy evaluation.
///
/// H and S are always reported relative to this state, never absolute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceState {
    /// Reference temperature (K)
    pub t: f64,
    /// Reference pressure (Pa)
    pub p: f64,
    /// Reference phase
    pub phase: Phase,
    /// Enthalpy at the reference state (J/mol)
    pub h: f64,
    /// Entropy at the reference state (J/(mol·K))
    pub s: f64,
}

impl Default for ReferenceState {
    fn default() -> Self {
        Self {
            t: pf_core::units::constants::T_STANDARD_K,
            p: pf_core::units::constants::P_STANDARD_PA,
            phase: Phase::Liquid,
            h: 0.0,
            s: 0.0,
        }
    }
}

/// Temperature bound of a sensible-heat leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    /// The model's reference temperature.
    Ref,
    /// The melting point `Tm`.
    Melting,
    /// The normal boiling point `Tb`.
    Boiling,
    /// The query temperature.
    Target,
}

/// One leg of a phase path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    /// Directed heat-capacity integral of `phase` between two bounds.
    Sensible { phase: Phase, from: Bound, to: Bound },
    /// Latent heat of fusion: melting when `forward`, freezing otherwise.
    Fusion { forward: bool },
    /// Latent heat of vaporization: boiling when `forward`, condensing otherwise.
    Vaporization { forward: bool },
}

/// Ordered path between a reference phase and a target phase.
///
/// Directed integrals make the downward paths the exact mirrors of the
/// upward ones: reversing the bounds negates the sensible legs, and the
/// latent legs flip sign explicitly.
fn phase_path(reference: Phase, target: Phase) -> &'static [Segment] {
    use Bound::{Boiling, Melting, Ref, Target};
    use Phase::{Gas, Liquid, Solid};

    match (reference, target) {
        (Solid, Solid) => &[Segment::Sensible {
            phase: Solid,
            from: Ref,
            to: Target,
        }],
        (Liquid, Liquid) => &[Segment::Sensible {
            phase: Liquid,
            from: Ref,
            to: Target,
        }],
        (Gas, Gas) => &[Segment::Sensible {
            phase: Gas,
            from: Ref,
            to: Target,
        }],
        (Liquid, Gas) => &[
            Segment::Sensible {
                phase: Liquid,
                from: Ref,
                to: Boiling,
            },
            Segment::Vaporization { forward: true },
            Segment::Sensible {
                phase: Gas,
                from: Boiling,
                to: Target,
            },
        ],
        (Solid, Liquid) => &[
            Segment::Sensible {
                phase: Solid,
                from: Ref,
                to: Melting,
            },
            Segment::Fusion { forward: true },
            Segment::Sensible {
                phase: Liquid,
                from: Melting,
                to: Target,
            },
        ],
        (Liquid, Solid) => &[
            Segment::Sensible {
                phase: Liquid,
                from: Ref,
                to: Melting,
            },
            Segment::Fusion { forward: false },
            Segment::Sensible {
                phase: Solid,
                from: Melting,
                to: Target,
            },
        ],
        (Gas, Liquid) => &[
            Segment::Sensible {
                phase: Gas,
                from: Ref,
                to: Boiling,
            },
            Segment::Vaporization { forward: false },
            Segment::Sensible {
                phase: Liquid,
                from: Boiling,
                to: Target,
            },
        ],
        (Solid, Gas) => &[
            Segment::Sensible {
                phase: Solid,
                from: Ref,
                to: Melting,
            },
            Segment::Fusion { forward: true },
            Segment::Sensible {
                phase: Liquid,
                from: Melting,
                to: Boiling,
            },
            Segment::Vaporization { forward: true },
            Segment::Sensible {
                phase: Gas,
                from: Boiling,
                to: Target,
            },
        ],
        (Gas, Solid) => &[
            Segment::Sensible {
                phase: Gas,
                from: Ref,
                to: Boiling,
            },
            Segment::Vaporization { forward: false },
            Segment::Sensible {
                phase: Liquid,
                from: Boiling,
                to: Melting,
            },
            Segment::Fusion { forward: false },
            Segment::Sensible {
                phase: Solid,
                from: Melting,
                to: Target,
            },
        ],
    }
}

/// Precomputed sensible-heat legs between reference and transition
/// temperatures. Slots stay `None` when the data needed to compute them was
/// never supplied; evaluation then recomputes live and reports the precise
/// missing datum.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SegmentCache {
    pub(crate) s_ref_to_tm: Option<f64>,
    pub(crate) l_ref_to_tm: Option<f64>,
    pub(crate) l_ref_to_tb: Option<f64>,
    pub(crate) g_ref_to_tb: Option<f64>,
    pub(crate) l_tm_to_tb: Option<f64>,
}

impl SegmentCache {
    fn lookup(&self, phase: Phase, from: Bound, to: Bound) -> Option<f64> {
        match (phase, from, to) {
            (Phase::Solid, Bound::Ref, Bound::Melting) => self.s_ref_to_tm,
            (Phase::Liquid, Bound::Ref, Bound::Melting) => self.l_ref_to_tm,
            (Phase::Liquid, Bound::Ref, Bound::Boiling) => self.l_ref_to_tb,
            (Phase::Gas, Bound::Ref, Bound::Boiling) => self.g_ref_to_tb,
            (Phase::Liquid, Bound::Melting, Bound::Boiling) => self.l_tm_to_tb,
            (Phase::Liquid, Bound::Boiling, Bound::Melting) => self.l_tm_to_tb.map(|v| -v),
            _ => None,
        }
    }
}

/// Log-mean sensible-entropy form: `Cp((t0+t1)/2) · ln(t1/t0)`.
///
/// Entropy temperature terms always use this form; the integration scheme
/// selection affects enthalpy only.
pub(crate) fn log_mean_entropy(cp: &HeatCapacity, t0: f64, t1: f64) -> f64 {
    cp.eval((t0 + t1) / 2.0) * (t1 / t0).ln()
}

fn signed(v: f64, forward: bool) -> f64 {
    if forward { v } else { -v }
}

/// Immutable per-species property model, `Arc`-shared across streams.
///
/// Built by [`crate::CompoundBuilder`]; all correlation data and the
/// integration scheme are fixed at build time.
#[derive(Debug, Clone)]
pub struct CompoundModel {
    pub(crate) id: String,
    pub(crate) mw: f64,
    pub(crate) tm: Option<f64>,
    pub(crate) tb: Option<f64>,
    pub(crate) hfus: Option<f64>,
    pub(crate) hvap_tb: Option<f64>,
    pub(crate) hc: Option<f64>,
    pub(crate) cp_solid: Option<HeatCapacity>,
    pub(crate) cp_liquid: Option<HeatCapacity>,
    pub(crate) cp_gas: Option<HeatCapacity>,
    pub(crate) scheme: IntegrationScheme,
    pub(crate) reference: ReferenceState,
    pub(crate) h_int: SegmentCache,
    pub(crate) s_int: SegmentCache,
}

impl CompoundModel {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Molecular weight (g/mol).
    pub fn mw(&self) -> f64 {
        self.mw
    }

    /// Melting point (K), if supplied.
    pub fn tm(&self) -> Option<f64> {
        self.tm
    }

    /// Normal boiling point (K), if supplied.
    pub fn tb(&self) -> Option<f64> {
        self.tb
    }

    /// Molar enthalpy of fusion at `Tm` (J/mol), if supplied.
    pub fn fusion_enthalpy(&self) -> Option<f64> {
        self.hfus
    }

    /// Molar enthalpy of vaporization at `Tb` (J/mol), if supplied.
    pub fn vaporization_enthalpy(&self) -> Option<f64> {
        self.hvap_tb
    }

    /// Molar heat of combustion (J/mol), if supplied.
    pub fn heat_of_combustion(&self) -> Option<f64> {
        self.hc
    }

    pub fn scheme(&self) -> IntegrationScheme {
        self.scheme
    }

    pub fn reference(&self) -> &ReferenceState {
        &self.reference
    }

    /// Molar enthalpy at `(t, phase)` relative to the reference state (J/mol).
    ///
    /// Pressure-independent: evaluated along the constant-pressure path at
    /// the reference pressure, suitable for condensed phases and ideal-gas
    /// sensible heat.
    pub fn enthalpy(&self, t: Temperature, phase: Phase) -> ThermoResult<f64> {
        let target = t.value;
        let mut h = self.reference.h;
        for seg in phase_path(self.reference.phase, phase) {
            h += match *seg {
                Segment::Sensible { phase, from, to } => {
                    self.sensible_enthalpy(phase, from, to, target)?
                }
                Segment::Fusion { forward } => signed(self.require_hfus()?, forward),
                Segment::Vaporization { forward } => signed(self.require_hvap()?, forward),
            };
        }
        Ok(h)
    }

    /// Molar entropy at `(t, p, phase)` relative to the reference state
    /// (J/(mol·K)).
    ///
    /// Fluid phases carry the ideal-gas-law pressure correction
    /// `-R ln(p/p_ref)`; solids do not.
    pub fn entropy(&self, t: Temperature, p: Pressure, phase: Phase) -> ThermoResult<f64> {
        let target = t.value;
        let mut s = self.reference.s;
        if phase.is_fluid() {
            s -= R * (p.value / self.reference.p).ln();
        }
        for seg in phase_path(self.reference.phase, phase) {
            s += match *seg {
                Segment::Sensible { phase, from, to } => {
                    self.sensible_entropy(phase, from, to, target)?
                }
                Segment::Fusion { forward } => {
                    let tm = self.require_tm()?;
                    signed(self.require_hfus()?, forward) / tm
                }
                Segment::Vaporization { forward } => {
                    let tb = self.require_tb()?;
                    signed(self.require_hvap()?, forward) / tb
                }
            };
        }
        Ok(s)
    }

    /// Excess enthalpy relative to the ideal mixture (J/mol).
    ///
    /// Extension point for non-ideal mixture models; ideal (zero) here.
    pub fn h_excess(&self, _t: Temperature, _p: Pressure) -> f64 {
        0.0
    }

    /// Excess entropy relative to the ideal mixture (J/(mol·K)).
    ///
    /// Extension point for non-ideal mixture models; ideal (zero) here.
    pub fn s_excess(&self, _t: Temperature, _p: Pressure) -> f64 {
        0.0
    }

    fn sensible_enthalpy(
        &self,
        phase: Phase,
        from: Bound,
        to: Bound,
        target: f64,
    ) -> ThermoResult<f64> {
        if let Some(cached) = self.h_int.lookup(phase, from, to) {
            return Ok(cached);
        }
        let t0 = self.resolve_bound(from, target)?;
        let t1 = self.resolve_bound(to, target)?;
        let cp = self.heat_capacity(phase)?;
        Ok(self.scheme.integrate(|t| cp.eval(t), t0, t1))
    }

    fn sensible_entropy(
        &self,
        phase: Phase,
        from: Bound,
        to: Bound,
        target: f64,
    ) -> ThermoResult<f64> {
        if let Some(cached) = self.s_int.lookup(phase, from, to) {
            return Ok(cached);
        }
        let t0 = self.resolve_bound(from, target)?;
        let t1 = self.resolve_bound(to, target)?;
        let cp = self.heat_capacity(phase)?;
        Ok(log_mean_entropy(cp, t0, t1))
    }

    fn resolve_bound(&self, bound: Bound, target: f64) -> ThermoResult<f64> {
        match bound {
            Bound::Ref => Ok(self.reference.t),
            Bound::Target => Ok(target),
            Bound::Melting => self.tm.ok_or_else(|| self.missing("melting point", "fusion")),
            Bound::Boiling => self
                .tb
                .ok_or_else(|| self.missing("boiling point", "vaporization")),
        }
    }

    fn heat_capacity(&self, phase: Phase) -> ThermoResult<&HeatCapacity> {
        let slot = match phase {
            Phase::Solid => &self.cp_solid,
            Phase::Liquid => &self.cp_liquid,
            Phase::Gas => &self.cp_gas,
        };
        slot.as_ref().ok_or_else(|| ThermoError::MissingHeatCapacity {
            id: self.id.clone(),
            phase,
        })
    }

    fn require_tm(&self) -> ThermoResult<f64> {
        self.tm.ok_or_else(|| self.missing("melting point", "fusion"))
    }

    fn require_tb(&self) -> ThermoResult<f64> {
        self.tb
            .ok_or_else(|| self.missing("boiling point", "vaporization"))
    }

    fn require_hfus(&self) -> ThermoResult<f64> {
        self.hfus
            .ok_or_else(|| self.missing("fusion enthalpy", "fusion"))
    }

    fn require_hvap(&self) -> ThermoResult<f64> {
        self.hvap_tb
            .ok_or_else(|| self.missing("vaporization enthalpy", "vaporization"))
    }

    fn missing(&self, what: &'static str, transition: &'static str) -> ThermoError {
        ThermoError::MissingData {
            id: self.id.clone(),
            what,
            transition,
        }
    }
}

/// Per-stream mutable view of a shared property model.
///
/// Carries the state the stream imposes (T, P, phase); the molar amount
/// lives with the owning stream.
#[derive(Debug, Clone)]
pub struct Compound {
    model: Arc<CompoundModel>,
    pub t: Temperature,
    pub p: Pressure,
    pub phase: Phase,
}

impl Compound {
    /// New instance at the model's reference state.
    pub fn new(model: Arc<CompoundModel>) -> Self {
        let reference = *model.reference();
        Self {
            t: pf_core::units::k(reference.t),
            p: pf_core::units::pa(reference.p),
            phase: reference.phase,
            model,
        }
    }

    /// New instance at an explicit state.
    pub fn at(model: Arc<CompoundModel>, t: Temperature, p: Pressure, phase: Phase) -> Self {
        Self { model, t, p, phase }
    }

    pub fn model(&self) -> &Arc<CompoundModel> {
        &self.model
    }

    pub fn id(&self) -> &str {
        self.model.id()
    }

    /// Molar enthalpy at the carried state (J/mol).
    pub fn enthalpy(&self) -> ThermoResult<f64> {
        self.model.enthalpy(self.t, self.phase)
    }

    /// Molar entropy at the carried state (J/(mol·K)).
    pub fn entropy(&self) -> ThermoResult<f64> {
        self.model.entropy(self.t, self.p, self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CompoundBuilder;
    use approx::assert_relative_eq;
    use pf_core::units::{k, pa};

    // Water-like fixture with constant heat capacities so the `average`
    // scheme gives exact, hand-checkable numbers.
    fn waterlike() -> CompoundModel {
        CompoundBuilder::new("Waterlike", 18.015)
            .melting_point(273.15)
            .boiling_point(373.15)
            .fusion_enthalpy(6010.0)
            .vaporization_enthalpy(40660.0)
            .cp_solid(38.0)
            .cp_liquid(75.3)
            .cp_gas(33.6)
            .build()
            .unwrap()
    }

    // Fixture with both transitions above the reference temperature, so the
    // full solid->gas path integrates forward everywhere.
    fn waxlike(reference_phase: Phase) -> CompoundModel {
        CompoundBuilder::new("Waxlike", 100.0)
            .melting_point(350.0)
            .boiling_point(450.0)
            .fusion_enthalpy(6010.0)
            .vaporization_enthalpy(40660.0)
            .cp_solid(38.0)
            .cp_liquid(75.3)
            .cp_gas(33.6)
            .reference(ReferenceState {
                phase: reference_phase,
                ..ReferenceState::default()
            })
            .build()
            .unwrap()
    }

    #[test]
    fn same_phase_is_a_single_sensible_leg() {
        let m = waterlike();
        let h = m.enthalpy(k(350.0), Phase::Liquid).unwrap();
        assert_relative_eq!(h, 75.3 * (350.0 - 298.15), max_relative = 1e-12);
    }

    #[test]
    fn liquid_ref_to_gas_crosses_vaporization() {
        let m = waterlike();
        let h = m.enthalpy(k(400.0), Phase::Gas).unwrap();
        let expected = 75.3 * (373.15 - 298.15) + 40660.0 + 33.6 * (400.0 - 373.15);
        assert_relative_eq!(h, expected, max_relative = 1e-12);
    }

    #[test]
    fn liquid_ref_to_solid_traverses_fusion_downward() {
        let m = waterlike();
        let h = m.enthalpy(k(250.0), Phase::Solid).unwrap();
        let expected = 75.3 * (273.15 - 298.15) - 6010.0 + 38.0 * (250.0 - 273.15);
        assert_relative_eq!(h, expected, max_relative = 1e-12);
    }

    #[test]
    fn solid_ref_to_gas_walks_the_full_three_phase_path() {
        let m = waxlike(Phase::Solid);
        let h = m.enthalpy(k(500.0), Phase::Gas).unwrap();
        let expected =
            38.0 * (350.0 - 298.15) + 6010.0 + 75.3 * (450.0 - 350.0) + 40660.0
                + 33.6 * (500.0 - 450.0);
        assert_relative_eq!(h, expected, max_relative = 1e-12);
    }

    #[test]
    fn gas_ref_to_solid_is_the_fully_negated_mirror() {
        let m = waxlike(Phase::Gas);
        let h = m.enthalpy(k(300.0), Phase::Solid).unwrap();
        let expected = 33.6 * (450.0 - 298.15) - 40660.0 + 75.3 * (350.0 - 450.0) - 6010.0
            + 38.0 * (300.0 - 350.0);
        assert_relative_eq!(h, expected, max_relative = 1e-12);
    }

    #[test]
    fn enthalpy_is_continuous_across_fusion_up_to_the_latent_heat() {
        let m = waterlike();
        let tm = 273.15;
        for eps in [1.0, 0.1, 1e-3, 1e-6] {
            let h_solid = m.enthalpy(k(tm - eps), Phase::Solid).unwrap();
            let h_liquid = m.enthalpy(k(tm + eps), Phase::Liquid).unwrap();
            // The jump converges to exactly Hfus as eps -> 0.
            let jump = h_liquid - h_solid;
            assert!((jump - 6010.0).abs() <= (75.3 + 38.0) * eps + 1e-9);
        }
    }

    #[test]
    fn entropy_matches_the_log_mean_form() {
        let m = waterlike();
        let s = m.entropy(k(400.0), pa(101_325.0), Phase::Gas).unwrap();
        let expected = 75.3 * (373.15_f64 / 298.15).ln()
            + 40660.0 / 373.15
            + 33.6 * (400.0_f64 / 373.15).ln();
        assert_relative_eq!(s, expected, max_relative = 1e-12);
    }

    #[test]
    fn entropy_pressure_correction_applies_to_fluids_only() {
        let m = waterlike();
        let p2 = pa(2.0 * 101_325.0);
        let s_liquid_ref = m.entropy(k(298.15), pa(101_325.0), Phase::Liquid).unwrap();
        let s_liquid_hi = m.entropy(k(298.15), p2, Phase::Liquid).unwrap();
        assert_relative_eq!(
            s_liquid_ref - s_liquid_hi,
            R * 2.0_f64.ln(),
            max_relative = 1e-12
        );

        let s_solid_lo = m.entropy(k(250.0), pa(101_325.0), Phase::Solid).unwrap();
        let s_solid_hi = m.entropy(k(250.0), p2, Phase::Solid).unwrap();
        assert_relative_eq!(s_solid_lo, s_solid_hi, max_relative = 1e-12);
    }

    #[test]
    fn missing_boiling_point_fails_loudly() {
        let m = CompoundBuilder::new("NoBoil", 100.0)
            .cp_liquid(100.0)
            .cp_gas(50.0)
            .build()
            .unwrap();
        let err = m.enthalpy(k(400.0), Phase::Gas).unwrap_err();
        assert!(matches!(err, ThermoError::MissingData { .. }));
        let msg = err.to_string();
        assert!(msg.contains("NoBoil"));
        assert!(msg.contains("boiling point"));
    }

    #[test]
    fn missing_latent_heat_fails_loudly() {
        let m = CompoundBuilder::new("NoVap", 100.0)
            .boiling_point(400.0)
            .cp_liquid(100.0)
            .cp_gas(50.0)
            .build()
            .unwrap();
        let err = m.enthalpy(k(450.0), Phase::Gas).unwrap_err();
        assert!(err.to_string().contains("vaporization enthalpy"));
        // Entropy faults identically on the same missing datum.
        let err_s = m.entropy(k(450.0), pa(101_325.0), Phase::Gas).unwrap_err();
        assert!(err_s.to_string().contains("vaporization enthalpy"));
    }

    #[test]
    fn missing_heat_capacity_names_the_phase() {
        let m = CompoundBuilder::new("NoSolidCp", 100.0)
            .melting_point(300.0)
            .fusion_enthalpy(5000.0)
            .cp_liquid(100.0)
            .build()
            .unwrap();
        let err = m.enthalpy(k(250.0), Phase::Solid).unwrap_err();
        assert!(matches!(err, ThermoError::MissingHeatCapacity { .. }));
    }

    #[test]
    fn excess_terms_are_ideal() {
        let m = waterlike();
        assert_eq!(m.h_excess(k(400.0), pa(101_325.0)), 0.0);
        assert_eq!(m.s_excess(k(400.0), pa(101_325.0)), 0.0);
    }

    #[test]
    fn compound_view_tracks_mutable_state() {
        let model = Arc::new(waterlike());
        let mut c = Compound::new(model);
        assert_relative_eq!(c.enthalpy().unwrap(), 0.0, epsilon = 1e-12);
        c.t = k(350.0);
        assert_relative_eq!(
            c.enthalpy().unwrap(),
            75.3 * (350.0 - 298.15),
            max_relative = 1e-12
        );
        c.phase = Phase::Gas;
        c.t = k(400.0);
        assert!(c.enthalpy().unwrap() > 40_000.0);
    }
}
