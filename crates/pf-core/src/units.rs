// pf-core/src/units.rs

use uom::si::f64::{
    Energy as UomEnergy, Mass as UomMass, MassRate as UomMassRate, Power as UomPower,
    Pressure as UomPressure, Ratio as UomRatio, TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Energy = UomEnergy;
pub type Mass = UomMass;
pub type MassRate = UomMassRate;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

pub mod constants {
    use super::*;

    /// Standard reference temperature (K)
    pub const T_STANDARD_K: f64 = 298.15;

    /// Standard reference pressure (Pa)
    pub const P_STANDARD_PA: f64 = 101_325.0;

    #[inline]
    pub fn t_standard() -> Temperature {
        k(T_STANDARD_K)
    }

    #[inline]
    pub fn p_standard() -> Pressure {
        pa(P_STANDARD_PA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _t = k(300.0);
        let _w = kw(42.0);
        let _r = unitless(0.5);
        assert_eq!(constants::t_standard().value, 298.15);
        assert_eq!(constants::p_standard().value, 101_325.0);
    }
}
