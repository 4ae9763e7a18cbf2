//! Electricity consumption/production bookkeeping.

/// Electricity price (USD/kWh).
pub const ELECTRICITY_PRICE: f64 = 0.0782;

/// Tracks a unit's electricity balance (kW).
///
/// Setting the rate folds the sign: a non-negative rate is pure consumption,
/// a negative rate pure production. Both attributes can also be set
/// individually for units that consume and produce at once.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PowerUtility {
    /// Electricity consumption (kW).
    pub consumption: f64,
    /// Electricity production (kW).
    pub production: f64,
}

impl PowerUtility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Net power requirement (kW): consumption minus production.
    pub fn rate(&self) -> f64 {
        self.consumption - self.production
    }

    /// Set the net rate (kW), folding the sign into the two attributes.
    pub fn set_rate(&mut self, rate: f64) {
        if rate >= 0.0 {
            self.consumption = rate;
            self.production = 0.0;
        } else {
            self.consumption = 0.0;
            self.production = -rate;
        }
    }

    /// Cost of the net requirement (USD/hr).
    pub fn cost(&self) -> f64 {
        ELECTRICITY_PRICE * self.rate()
    }

    /// Aggregate the requirements of several power utilities.
    pub fn sum<'a>(utilities: impl IntoIterator<Item = &'a PowerUtility>) -> Self {
        let mut total = Self::new();
        for u in utilities {
            total.consumption += u.consumption;
            total.production += u.production;
        }
        total
    }
}
