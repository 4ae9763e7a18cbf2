//! Builder for concrete property models.

use crate::compound::{CompoundModel, ReferenceState, SegmentCache, log_mean_entropy};
use crate::cp::HeatCapacity;
use crate::error::{ThermoError, ThermoResult};
use crate::integrate::IntegrationScheme;
use tracing::debug;

/// Builds a [`CompoundModel`] from constant or temperature-dependent
/// correlation data.
///
/// Heat capacities are settable per phase; a shared [`cp_all`] constant
/// fills any phase slot left unset (phase-specific slots win). The
/// integration scheme is fixed here, so sibling species with different
/// schemes never interfere.
///
/// [`cp_all`]: CompoundBuilder::cp_all
#[derive(Debug)]
pub struct CompoundBuilder {
    id: String,
    mw: f64,
    tm: Option<f64>,
    tb: Option<f64>,
    hfus: Option<f64>,
    hvap_tb: Option<f64>,
    hc: Option<f64>,
    cp_solid: Option<HeatCapacity>,
    cp_liquid: Option<HeatCapacity>,
    cp_gas: Option<HeatCapacity>,
    cp_all: Option<f64>,
    reference: ReferenceState,
    scheme: IntegrationScheme,
}

impl CompoundBuilder {
    /// Start a builder for species `id` with molecular weight `mw` (g/mol).
    pub fn new(id: impl Into<String>, mw: f64) -> Self {
        Self {
            id: id.into(),
            mw,
            tm: None,
            tb: None,
            hfus: None,
            hvap_tb: None,
            hc: None,
            cp_solid: None,
            cp_liquid: None,
            cp_gas: None,
            cp_all: None,
            reference: ReferenceState::default(),
            scheme: IntegrationScheme::default(),
        }
    }

    /// Melting point (K).
    pub fn melting_point(mut self, tm: f64) -> Self {
        self.tm = Some(tm);
        self
    }

    /// Normal boiling point (K).
    pub fn boiling_point(mut self, tb: f64) -> Self {
        self.tb = Some(tb);
        self
    }

    /// Molar enthalpy of fusion at `Tm` (J/mol).
    pub fn fusion_enthalpy(mut self, hfus: f64) -> Self {
        self.hfus = Some(hfus);
        self
    }

    /// Molar enthalpy of vaporization at `Tb` (J/mol).
    pub fn vaporization_enthalpy(mut self, hvap: f64) -> Self {
        self.hvap_tb = Some(hvap);
        self
    }

    /// Molar heat of combustion (J/mol).
    pub fn heat_of_combustion(mut self, hc: f64) -> Self {
        self.hc = Some(hc);
        self
    }

    /// Solid-phase heat capacity (J/(mol·K)): a constant or a function of T.
    pub fn cp_solid(mut self, cp: impl Into<HeatCapacity>) -> Self {
        self.cp_solid = Some(cp.into());
        self
    }

    /// Liquid-phase heat capacity (J/(mol·K)): a constant or a function of T.
    pub fn cp_liquid(mut self, cp: impl Into<HeatCapacity>) -> Self {
        self.cp_liquid = Some(cp.into());
        self
    }

    /// Gas-phase heat capacity (J/(mol·K)): a constant or a function of T.
    pub fn cp_gas(mut self, cp: impl Into<HeatCapacity>) -> Self {
        self.cp_gas = Some(cp.into());
        self
    }

    /// Shared constant heat capacity (J/(mol·K)) for every phase slot left
    /// unset. Phase-specific slots take precedence.
    pub fn cp_all(mut self, cp: f64) -> Self {
        self.cp_all = Some(cp);
        self
    }

    /// Override the reference state (defaults to 298.15 K, 101 325 Pa,
    /// liquid, H = S = 0).
    pub fn reference(mut self, reference: ReferenceState) -> Self {
        self.reference = reference;
        self
    }

    /// Select the integration scheme (defaults to `Average`).
    pub fn scheme(mut self, scheme: IntegrationScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Validate the data and produce the immutable model, precomputing the
    /// reference-to-transition segment integrals wherever the inputs allow.
    pub fn build(self) -> ThermoResult<CompoundModel> {
        let non_physical = |what: &'static str| ThermoError::NonPhysical {
            id: self.id.clone(),
            what,
        };

        if !self.mw.is_finite() || self.mw <= 0.0 {
            return Err(non_physical("molecular weight must be positive and finite"));
        }
        for (value, what) in [
            (self.tm, "melting point must be positive and finite"),
            (self.tb, "boiling point must be positive and finite"),
        ] {
            if let Some(t) = value {
                if !t.is_finite() || t <= 0.0 {
                    return Err(non_physical(what));
                }
            }
        }
        for (value, what) in [
            (self.hfus, "fusion enthalpy must be positive and finite"),
            (self.hvap_tb, "vaporization enthalpy must be positive and finite"),
        ] {
            if let Some(h) = value {
                if !h.is_finite() || h <= 0.0 {
                    return Err(non_physical(what));
                }
            }
        }
        if let (Some(tm), Some(tb)) = (self.tm, self.tb) {
            if tm >= tb {
                return Err(non_physical("melting point must lie below boiling point"));
            }
        }
        if self.hfus.is_some() && self.tm.is_none() {
            return Err(non_physical("fusion enthalpy supplied without a melting point"));
        }
        if self.hvap_tb.is_some() && self.tb.is_none() {
            return Err(non_physical(
                "vaporization enthalpy supplied without a boiling point",
            ));
        }

        let shared = self.cp_all.map(HeatCapacity::Constant);
        let cp_solid = self.cp_solid.or_else(|| shared.clone());
        let cp_liquid = self.cp_liquid.or_else(|| shared.clone());
        let cp_gas = self.cp_gas.or(shared);

        let mut model = CompoundModel {
            id: self.id,
            mw: self.mw,
            tm: self.tm,
            tb: self.tb,
            hfus: self.hfus,
            hvap_tb: self.hvap_tb,
            hc: self.hc,
            cp_solid,
            cp_liquid,
            cp_gas,
            scheme: self.scheme,
            reference: self.reference,
            h_int: SegmentCache::default(),
            s_int: SegmentCache::default(),
        };
        model.h_int = precompute_enthalpy_segments(&model);
        model.s_int = precompute_entropy_segments(&model);

        debug!(id = %model.id, scheme = model.scheme.name(), "compound model built");
        Ok(model)
    }
}

fn precompute_enthalpy_segments(model: &CompoundModel) -> SegmentCache {
    let t_ref = model.reference.t;
    let integral = |cp: &Option<HeatCapacity>, t0: f64, t1: f64| {
        cp.as_ref()
            .map(|cp| model.scheme.integrate(|t| cp.eval(t), t0, t1))
    };
    SegmentCache {
        s_ref_to_tm: model.tm.and_then(|tm| integral(&model.cp_solid, t_ref, tm)),
        l_ref_to_tm: model.tm.and_then(|tm| integral(&model.cp_liquid, t_ref, tm)),
        l_ref_to_tb: model.tb.and_then(|tb| integral(&model.cp_liquid, t_ref, tb)),
        g_ref_to_tb: model.tb.and_then(|tb| integral(&model.cp_gas, t_ref, tb)),
        l_tm_to_tb: match (model.tm, model.tb) {
            (Some(tm), Some(tb)) => integral(&model.cp_liquid, tm, tb),
            _ => None,
        },
    }
}

fn precompute_entropy_segments(model: &CompoundModel) -> SegmentCache {
    let t_ref = model.reference.t;
    let log_mean = |cp: &Option<HeatCapacity>, t0: f64, t1: f64| {
        cp.as_ref().map(|cp| log_mean_entropy(cp, t0, t1))
    };
    SegmentCache {
        s_ref_to_tm: model.tm.and_then(|tm| log_mean(&model.cp_solid, t_ref, tm)),
        l_ref_to_tm: model.tm.and_then(|tm| log_mean(&model.cp_liquid, t_ref, tm)),
        l_ref_to_tb: model.tb.and_then(|tb| log_mean(&model.cp_liquid, t_ref, tb)),
        g_ref_to_tb: model.tb.and_then(|tb| log_mean(&model.cp_gas, t_ref, tb)),
        l_tm_to_tb: match (model.tm, model.tb) {
            (Some(tm), Some(tb)) => log_mean(&model.cp_liquid, tm, tb),
            _ => None,
        },
    }
}
