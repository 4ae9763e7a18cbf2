//! Boiler/turbogenerator facility.

use crate::common::check_finite;
use crate::design::DesignResults;
use crate::error::UnitResult;
use crate::heat_utility::{HeatUtility, UtilityKind};
use crate::power_utility::PowerUtility;
use crate::unit::{FlowUnit, PeerUtilities, StreamPool};
use pf_core::StreamId;
use tracing::debug;

/// Latent heat charged against feed moisture (kJ/kg water).
const MOISTURE_LATENT: f64 = 2300.0;
/// Heating duty of boiler makeup water (kJ/kmol).
const MAKEUP_WATER_DUTY: f64 = 17_757.0;
/// Molecular weight of steam (g/mol).
const STEAM_MW: f64 = 18.01528;
/// Species ID used for the feed moisture and makeup-water lookups.
const WATER_ID: &str = "Water";

/// Aggregate low-pressure steam demand discovered across the network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedSteamDemand {
    /// Total steam molar demand (kmol/hr).
    pub steam_mol: f64,
    /// Total cost of the served steam utilities (USD/hr).
    pub cost: f64,
}

/// Burns the feed to raise steam and generate electricity.
///
/// `run` is a no-op: combustion produces no modeled species change, the
/// emission is a mass-balance placeholder. `design` discovers the
/// network-wide low-pressure-steam demand, sizes steam production from the
/// feed's heat of combustion (corrected for boiler efficiency and feed
/// moisture), and routes the remaining heat through the turbogenerator.
///
/// Steam discovery is a one-shot cache: once populated it is deliberately
/// sticky for the instance's lifetime even if the network topology changes,
/// until [`invalidate_steam_cache`] is called.
///
/// [`invalidate_steam_cache`]: BoilerTurbogenerator::invalidate_steam_cache
pub struct BoilerTurbogenerator {
    name: String,
    ins: [StreamId; 2],
    outs: [StreamId; 2],
    side_steam: Option<StreamId>,
    /// Fraction of combustion heat transferred to steam.
    pub boiler_efficiency: f64,
    /// Fraction of available steam heat converted to electricity.
    pub turbogenerator_efficiency: f64,
    /// Superheat duty per mole of steam (kJ/kmol).
    pub duty_per_mol: f64,
    /// Fraction of produced steam lost to blowdown.
    pub boiler_blowdown: f64,
    /// Reverse-osmosis rejection fraction of the makeup-water treatment.
    pub ro_rejection: f64,
    steam_demand: Option<CachedSteamDemand>,
    /// [0] cooling, [1] steam credit.
    heat_utilities: [HeatUtility; 2],
    power_utility: PowerUtility,
    design: DesignResults,
    total_steam: f64,
}

impl BoilerTurbogenerator {
    /// New facility wired as feed/makeup-water inlets and
    /// emission/blowdown-loss outlets, with the standard efficiencies
    /// (boiler 0.80, turbogenerator 0.85) and 3% blowdown.
    pub fn new(
        name: impl Into<String>,
        feed: StreamId,
        emission: StreamId,
        makeup_water: StreamId,
        blowdown_loss: StreamId,
    ) -> Self {
        Self {
            name: name.into(),
            ins: [feed, makeup_water],
            outs: [emission, blowdown_loss],
            side_steam: None,
            boiler_efficiency: 0.80,
            turbogenerator_efficiency: 0.85,
            duty_per_mol: 50_000.0,
            boiler_blowdown: 0.03,
            ro_rejection: 0.0,
            steam_demand: None,
            heat_utilities: [HeatUtility::new(), HeatUtility::new()],
            power_utility: PowerUtility::new(),
            design: DesignResults::new(),
            total_steam: 0.0,
        }
    }

    /// Add a side stream whose enthalpy joins the steam demand.
    pub fn with_side_steam(mut self, side_steam: StreamId) -> Self {
        self.side_steam = Some(side_steam);
        self
    }

    /// The discovered steam demand, if any design pass has run.
    pub fn steam_demand(&self) -> Option<&CachedSteamDemand> {
        self.steam_demand.as_ref()
    }

    /// Drop the cached steam demand so the next design pass rediscovers it.
    pub fn invalidate_steam_cache(&mut self) {
        self.steam_demand = None;
    }

    /// Total steam produced by the boiler (kmol/hr), from the last design.
    pub fn total_steam(&self) -> f64 {
        self.total_steam
    }
}

fn discover_steam_demand(name: &str, peers: &PeerUtilities) -> CachedSteamDemand {
    let mut steam_mol = 0.0;
    let mut cost = 0.0;
    let mut consumers = 0usize;
    for hu in peers.iter() {
        if hu.kind_opt() == Some(UtilityKind::LowPressureSteam) {
            steam_mol += hu.flow;
            cost += hu.cost;
            consumers += 1;
        }
    }
    debug!(unit = name, consumers, steam_mol, "discovered steam demand");
    CachedSteamDemand { steam_mol, cost }
}

impl FlowUnit for BoilerTurbogenerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn ins(&self) -> &[StreamId] {
        &self.ins
    }

    fn outs(&self) -> &[StreamId] {
        &self.outs
    }

    /// No-op: the facility produces no new chemical species.
    fn run(&mut self, _streams: &mut StreamPool) -> UnitResult<()> {
        Ok(())
    }

    fn design(&mut self, streams: &mut StreamPool, peers: &PeerUtilities) -> UnitResult<()> {
        // The costing layer restates the baseline load between design and
        // end_costing; start each pass from a clean balance.
        self.power_utility.set_rate(0.0);

        if self.steam_demand.is_none() {
            self.steam_demand = Some(discover_steam_demand(&self.name, peers));
        }
        let demand = self.steam_demand.unwrap_or(CachedSteamDemand {
            steam_mol: 0.0,
            cost: 0.0,
        });

        let feed = streams.get(self.ins[0])?.clone();

        let mut h_steam = demand.steam_mol * self.duty_per_mol;
        if let Some(side) = self.side_steam {
            h_steam += streams.get(side)?.enthalpy()?;
        }

        // Mass balance placeholder only; combustion chemistry is not modeled.
        streams.get_mut(self.outs[0])?.set_mol(feed.mol())?;

        let feed_massnet = feed.massnet();
        let moisture = if feed_massnet > 0.0 {
            feed.mass_flow(WATER_ID).unwrap_or(0.0) / feed_massnet
        } else {
            0.0
        };
        let h_content = feed.heat_of_combustion() * self.boiler_efficiency
            - feed_massnet * MOISTURE_LATENT * moisture;
        check_finite(h_content, "boiler heat content")?;

        self.total_steam = h_content / self.duty_per_mol;

        let makeup_mol = self.total_steam * self.boiler_blowdown / (1.0 - self.ro_rejection);
        {
            let makeup = streams.get_mut(self.ins[1])?;
            makeup.set_flow(WATER_ID, makeup_mol)?;
            let makeup_snapshot = makeup.clone();
            // The blowdown-loss outlet mirrors the makeup stream.
            streams.get_mut(self.outs[1])?.copy_like(&makeup_snapshot)?;
        }

        let h_electricity = h_content - h_steam - makeup_mol * MAKEUP_WATER_DUTY;

        self.design.insert("Flow rate", self.total_steam * STEAM_MW);

        let (electricity, cooling, steam_duty) = if h_electricity < 0.0 {
            // Not enough heat for power generation: all of it serves steam.
            (0.0, 0.0, h_content)
        } else {
            let electricity = h_electricity * self.turbogenerator_efficiency;
            (electricity, electricity - h_electricity, h_steam)
        };

        self.heat_utilities[0].exchange(UtilityKind::CoolingWater, cooling);
        let hu_steam = &mut self.heat_utilities[1];
        hu_steam.set_kind(UtilityKind::LowPressureSteam);
        hu_steam.duty = steam_duty;
        hu_steam.flow = demand.steam_mol;
        hu_steam.cost = -demand.cost;

        self.design.insert("Work", electricity / 3600.0);

        debug!(
            unit = %self.name,
            total_steam = self.total_steam,
            electricity_kw = electricity / 3600.0,
            "sized boiler/turbogenerator"
        );
        Ok(())
    }

    fn heat_utilities(&self) -> &[HeatUtility] {
        &self.heat_utilities
    }

    fn power_utility(&self) -> Option<&PowerUtility> {
        Some(&self.power_utility)
    }

    fn design_results(&self) -> Option<&DesignResults> {
        Some(&self.design)
    }

    /// Offset the plant's baseline load by the generated electricity,
    /// strictly after costing has consumed the raw `Work` value.
    fn end_costing(&mut self) {
        let work = self.design.get("Work").unwrap_or(0.0);
        let rate = self.power_utility.rate();
        self.power_utility.set_rate(rate - work);
    }
}
