//! Predefined species with literature constants.
//!
//! Each function returns a pre-filled [`CompoundBuilder`] so callers can
//! still override the reference state or integration scheme before building.
//!
//! Values sourced from standard reference data (e.g., NIST); molar heat
//! capacities are near-ambient constants adequate for the correlation-level
//! accuracy of this model.

use crate::builder::CompoundBuilder;

/// Water (H₂O). Heat of combustion is absent: water does not burn.
pub fn water() -> CompoundBuilder {
    CompoundBuilder::new("Water", 18.01528)
        .melting_point(273.15)
        .boiling_point(373.15)
        .fusion_enthalpy(6010.0)
        .vaporization_enthalpy(40_660.0)
        .cp_solid(38.1)
        .cp_liquid(75.31)
        .cp_gas(33.59)
}

/// Ethanol (C₂H₅OH). Heat of combustion is the higher heating value.
pub fn ethanol() -> CompoundBuilder {
    CompoundBuilder::new("Ethanol", 46.068)
        .melting_point(159.05)
        .boiling_point(351.39)
        .fusion_enthalpy(4931.0)
        .vaporization_enthalpy(38_560.0)
        .heat_of_combustion(1_366_800.0)
        .cp_liquid(112.3)
        .cp_gas(65.6)
}

/// Glucose (C₆H₁₂O₆). No boiling point: decomposes before boiling, so any
/// gas-phase query fails with missing data, by design.
pub fn glucose() -> CompoundBuilder {
    CompoundBuilder::new("Glucose", 180.156)
        .melting_point(419.15)
        .fusion_enthalpy(32_400.0)
        .heat_of_combustion(2_803_000.0)
        .cp_solid(218.6)
        .cp_liquid(350.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThermoError;
    use crate::phase::Phase;
    use pf_core::units::k;

    #[test]
    fn catalog_species_build() {
        assert_eq!(water().build().unwrap().id(), "Water");
        assert_eq!(ethanol().build().unwrap().mw(), 46.068);
        assert!(glucose().build().unwrap().heat_of_combustion().is_some());
    }

    #[test]
    fn glucose_has_no_gas_path() {
        let m = glucose().build().unwrap();
        let err = m.enthalpy(k(500.0), Phase::Gas).unwrap_err();
        assert!(matches!(err, ThermoError::MissingData { .. }));
    }

    #[test]
    fn water_carries_the_standard_vaporization_enthalpy() {
        let m = water().build().unwrap();
        assert_eq!(m.tb(), Some(373.15));
        assert_eq!(m.vaporization_enthalpy(), Some(40_660.0));
    }
}
