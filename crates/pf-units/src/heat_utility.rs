//! Heating/cooling utility records exchanged with units.

use crate::error::{UnitError, UnitResult};

/// Utility agents available to units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UtilityKind {
    LowPressureSteam,
    CoolingWater,
}

impl UtilityKind {
    /// Display name, matching the IDs used across the flowsheet.
    pub fn name(&self) -> &'static str {
        match self {
            UtilityKind::LowPressureSteam => "Low pressure steam",
            UtilityKind::CoolingWater => "Cooling water",
        }
    }

    /// Agent supply temperature (K).
    pub fn temperature(&self) -> f64 {
        match self {
            UtilityKind::LowPressureSteam => 412.15,
            UtilityKind::CoolingWater => 305.37,
        }
    }

    /// Duty carried per mole of agent (kJ/kmol): latent heat for steam,
    /// sensible heat over the allowed rise for cooling water.
    pub fn duty_per_mol(&self) -> f64 {
        match self {
            UtilityKind::LowPressureSteam => 40_660.0,
            UtilityKind::CoolingWater => 753.0,
        }
    }

    /// Price per unit duty (USD/kJ).
    pub fn price_per_duty(&self) -> f64 {
        match self {
            UtilityKind::LowPressureSteam => 1.328e-5,
            UtilityKind::CoolingWater => 4.4e-7,
        }
    }
}

impl core::fmt::Display for UtilityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A quantity of heating/cooling duty exchanged between a unit and an agent.
///
/// Freshly constructed records are unset: querying [`kind`] before any
/// exchange is an [`UnitError::EmptyResult`], signaling that the owning unit
/// never actually exchanged the named utility.
///
/// [`kind`]: HeatUtility::kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatUtility {
    kind: Option<UtilityKind>,
    /// Duty exchanged (kJ/hr); positive heating, negative cooling.
    pub duty: f64,
    /// Agent molar flow (kmol/hr).
    pub flow: f64,
    /// Cost (USD/hr).
    pub cost: f64,
}

impl HeatUtility {
    pub fn new() -> Self {
        Self::default()
    }

    /// The exchanged agent. Fails if no exchange ever happened.
    pub fn kind(&self) -> UnitResult<UtilityKind> {
        self.kind.ok_or(UnitError::EmptyResult {
            what: "heat utility queried before any exchange",
        })
    }

    /// The exchanged agent without the emptiness check, for filtering.
    pub fn kind_opt(&self) -> Option<UtilityKind> {
        self.kind
    }

    /// Record an exchange of `duty` (kJ/hr) with the given agent, deriving
    /// agent flow and cost from the agent constants.
    pub fn exchange(&mut self, kind: UtilityKind, duty: f64) {
        self.kind = Some(kind);
        self.duty = duty;
        self.flow = duty.abs() / kind.duty_per_mol();
        self.cost = duty.abs() * kind.price_per_duty();
    }

    /// Mark the record as carrying `kind` without deriving flow/cost;
    /// the caller fills those fields (used by producers crediting an agent).
    pub fn set_kind(&mut self, kind: UtilityKind) {
        self.kind = Some(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_record_fails_on_kind_query() {
        let hu = HeatUtility::new();
        let err = hu.kind().unwrap_err();
        assert!(matches!(err, UnitError::EmptyResult { .. }));
    }

    #[test]
    fn exchange_derives_flow_and_cost() {
        let mut hu = HeatUtility::new();
        hu.exchange(UtilityKind::LowPressureSteam, 406_600.0);
        assert_eq!(hu.kind().unwrap(), UtilityKind::LowPressureSteam);
        assert_eq!(hu.flow, 10.0);
        assert!(hu.cost > 0.0);
    }

    #[test]
    fn cooling_duty_is_negative_but_flow_is_not() {
        let mut hu = HeatUtility::new();
        hu.exchange(UtilityKind::CoolingWater, -7530.0);
        assert_eq!(hu.flow, 10.0);
        assert!(hu.cost > 0.0);
    }

    #[test]
    fn display_names_match_flowsheet_ids() {
        assert_eq!(
            UtilityKind::LowPressureSteam.to_string(),
            "Low pressure steam"
        );
    }
}
