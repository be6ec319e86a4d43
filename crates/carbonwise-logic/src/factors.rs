//! Emission factor table: the fixed intensities every calculation reads.
//!
//! Values come from EPA 2024 emission factors and 2023 eGRID state
//! electricity data. The table is plain data: lookups only, no arithmetic
//! beyond picking the right constant. A different table can be loaded from
//! JSON and handed to [`crate::calculator::compute_with`] without touching
//! any calculation code.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::input::{CabinClass, DietProfile, TransportMode};

/// Complete set of emission intensities (kg CO2e per unit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactors {
    pub transport: TransportFactors,
    pub aviation: AviationFactors,
    pub energy: EnergyFactors,
    /// Region code → kg CO2e per kWh.
    pub electricity_by_region: BTreeMap<String, f64>,
    pub consumption: ConsumptionFactors,
    pub waste: WasteFactors,
    pub water: WaterFactors,
    pub diet: DietFactors,
    /// Household size → per-person multiplier. Sizes not listed use 1.0.
    pub household: BTreeMap<u8, f64>,
    pub baselines: Baselines,
}

/// Per-mile factors for commute modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportFactors {
    pub car_gasoline: f64,
    pub car_diesel: f64,
    pub car_hybrid: f64,
    pub car_electric: f64,
    pub motorcycle: f64,
    pub bus: f64,
    pub train_commuter: f64,
    pub train_intercity: f64,
    pub subway: f64,
    pub bike: f64,
    pub walk: f64,
    pub rideshare: f64,
    pub taxi: f64,
    /// Used for modes with no entry of their own (carpool, unrecognized).
    pub fallback: f64,
}

/// Per passenger-mile flight factors, tiered by trip distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AviationFactors {
    /// Trips up to `short_max_miles`.
    pub short_haul: f64,
    /// Trips up to `medium_max_miles`.
    pub medium_haul: f64,
    pub long_haul: f64,
    pub short_max_miles: f64,
    pub medium_max_miles: f64,
    pub business_multiplier: f64,
    pub first_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyFactors {
    /// National grid average per kWh, used for unknown regions.
    pub electricity_national_avg: f64,
    /// Per therm.
    pub natural_gas: f64,
    /// Per gallon.
    pub heating_oil: f64,
    /// Per gallon.
    pub propane: f64,
}

/// Spend-based proxies. Each category converts dollars to an activity
/// quantity (`*_per_dollar`) and multiplies by that activity's intensity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionFactors {
    /// kg of cotton clothing per dollar spent.
    pub clothing_kg_per_dollar: f64,
    /// kg CO2e per kg of cotton clothing.
    pub clothing_cotton: f64,
    /// Devices per dollar spent.
    pub devices_per_dollar: f64,
    /// kg CO2e per smartphone-equivalent device.
    pub device: f64,
    /// kg CO2e per dollar of general goods.
    pub general_goods: f64,
}

/// Per kg of waste. Negative values are avoided-emission credits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteFactors {
    pub landfill: f64,
    pub recycling: f64,
    pub composting: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterFactors {
    /// Per liter.
    pub tap: f64,
    /// Per liter.
    pub bottled: f64,
    /// Per liter of heated shower water.
    pub hot_shower: f64,
    /// Assumed shower flow rate.
    pub shower_liters_per_minute: f64,
}

/// Annual kg CO2e per diet profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietFactors {
    pub heavy_meat: f64,
    pub average_omnivore: f64,
    pub low_meat: f64,
    pub pescatarian: f64,
    pub vegetarian: f64,
    pub vegan: f64,
}

/// Reference annual footprints (kg CO2e per person) used for comparison only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baselines {
    pub national_average: f64,
    pub global_average: f64,
    /// 1.5°C pathway ceiling.
    pub target: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            transport: TransportFactors {
                car_gasoline: 0.404,
                car_diesel: 0.47,
                car_hybrid: 0.2,
                car_electric: 0.123, // average grid
                motorcycle: 0.28,
                bus: 0.055,
                train_commuter: 0.135,
                train_intercity: 0.15,
                subway: 0.04,
                bike: 0.0,
                walk: 0.0,
                rideshare: 0.45, // includes deadheading
                taxi: 0.5,
                fallback: 0.4,
            },
            aviation: AviationFactors {
                short_haul: 0.207,
                medium_haul: 0.129,
                long_haul: 0.163,
                short_max_miles: 300.0,
                medium_max_miles: 2300.0,
                business_multiplier: 2.0,
                first_multiplier: 3.0,
            },
            energy: EnergyFactors {
                electricity_national_avg: 0.386,
                natural_gas: 5.3,
                heating_oil: 10.18,
                propane: 5.7,
            },
            electricity_by_region: standard_regions(),
            consumption: ConsumptionFactors {
                clothing_kg_per_dollar: 0.01,
                clothing_cotton: 25.0,
                devices_per_dollar: 0.002,
                device: 80.0,
                general_goods: 0.3,
            },
            waste: WasteFactors {
                landfill: 0.8,
                recycling: -1.0,
                composting: -1.9, // avoided methane
            },
            water: WaterFactors {
                tap: 0.0005,
                bottled: 0.25,
                hot_shower: 0.15,
                shower_liters_per_minute: 10.0,
            },
            diet: DietFactors {
                heavy_meat: 3600.0,
                average_omnivore: 2500.0,
                low_meat: 1800.0,
                pescatarian: 1500.0,
                vegetarian: 1200.0,
                vegan: 1000.0,
            },
            household: [(1, 1.0), (2, 0.85), (3, 0.75), (4, 0.7), (5, 0.65), (6, 0.6)]
                .into_iter()
                .collect(),
            baselines: Baselines {
                national_average: 16000.0,
                global_average: 4800.0,
                target: 2300.0,
            },
        }
    }
}

/// 2023 eGRID electricity intensity by US state (kg CO2e per kWh).
const REGION_FACTORS: [(&str, f64); 51] = [
    ("AL", 0.708),
    ("AK", 0.531),
    ("AZ", 0.428),
    ("AR", 0.702),
    ("CA", 0.237),
    ("CO", 0.675),
    ("CT", 0.246),
    ("DE", 0.454),
    ("FL", 0.418),
    ("GA", 0.456),
    ("HI", 0.651),
    ("ID", 0.071),
    ("IL", 0.318),
    ("IN", 0.851),
    ("IA", 0.651),
    ("KS", 0.658),
    ("KY", 0.859),
    ("LA", 0.506),
    ("ME", 0.118),
    ("MD", 0.34),
    ("MA", 0.246),
    ("MI", 0.456),
    ("MN", 0.446),
    ("MS", 0.506),
    ("MO", 0.708),
    ("MT", 0.651),
    ("NE", 0.651),
    ("NV", 0.34),
    ("NH", 0.118),
    ("NJ", 0.246),
    ("NM", 0.708),
    ("NY", 0.21),
    ("NC", 0.34),
    ("ND", 0.851),
    ("OH", 0.456),
    ("OK", 0.658),
    ("OR", 0.071),
    ("PA", 0.34),
    ("RI", 0.246),
    ("SC", 0.34),
    ("SD", 0.446),
    ("TN", 0.34),
    ("TX", 0.418),
    ("UT", 0.708),
    ("VT", 0.003),
    ("VA", 0.34),
    ("WA", 0.071),
    ("WV", 0.859),
    ("WI", 0.651),
    ("WY", 0.851),
    ("DC", 0.34),
];

fn standard_regions() -> BTreeMap<String, f64> {
    REGION_FACTORS
        .iter()
        .map(|(code, factor)| (code.to_string(), *factor))
        .collect()
}

impl EmissionFactors {
    /// The built-in table, shared across calls.
    pub fn standard() -> &'static EmissionFactors {
        static STANDARD: OnceLock<EmissionFactors> = OnceLock::new();
        STANDARD.get_or_init(EmissionFactors::default)
    }

    /// Parse a replacement table from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn transport_factor(&self, mode: TransportMode) -> f64 {
        let t = &self.transport;
        match mode {
            TransportMode::CarGasoline => t.car_gasoline,
            TransportMode::CarDiesel => t.car_diesel,
            TransportMode::CarHybrid => t.car_hybrid,
            TransportMode::CarElectric => t.car_electric,
            TransportMode::Motorcycle => t.motorcycle,
            TransportMode::Bus => t.bus,
            TransportMode::TrainCommuter => t.train_commuter,
            TransportMode::TrainIntercity => t.train_intercity,
            TransportMode::Subway => t.subway,
            TransportMode::Bike => t.bike,
            TransportMode::Walk => t.walk,
            TransportMode::Rideshare => t.rideshare,
            TransportMode::Taxi => t.taxi,
            TransportMode::Carpool | TransportMode::Other => t.fallback,
        }
    }

    /// Distance-tiered per-mile flight factor.
    pub fn flight_factor(&self, distance_miles: f64) -> f64 {
        let a = &self.aviation;
        if distance_miles <= a.short_max_miles {
            a.short_haul
        } else if distance_miles <= a.medium_max_miles {
            a.medium_haul
        } else {
            a.long_haul
        }
    }

    pub fn cabin_multiplier(&self, class: CabinClass) -> f64 {
        match class {
            CabinClass::Economy => 1.0,
            CabinClass::Business => self.aviation.business_multiplier,
            CabinClass::First => self.aviation.first_multiplier,
        }
    }

    /// Electricity intensity for a region code, or the national average.
    pub fn electricity_factor(&self, region: &str) -> f64 {
        self.region_factor(region)
            .unwrap_or(self.energy.electricity_national_avg)
    }

    /// Electricity intensity only if the region is in the table.
    pub fn region_factor(&self, region: &str) -> Option<f64> {
        let code = region.trim().to_ascii_uppercase();
        self.electricity_by_region.get(&code).copied()
    }

    pub fn diet_annual(&self, profile: DietProfile) -> f64 {
        let d = &self.diet;
        match profile {
            DietProfile::HeavyMeat => d.heavy_meat,
            DietProfile::AverageOmnivore | DietProfile::Other => d.average_omnivore,
            DietProfile::LowMeat => d.low_meat,
            DietProfile::Pescatarian => d.pescatarian,
            DietProfile::Vegetarian => d.vegetarian,
            DietProfile::Vegan => d.vegan,
        }
    }

    /// Shared-resource multiplier for a household size (1.0 when unlisted).
    pub fn household_multiplier(&self, household_size: u8) -> f64 {
        self.household.get(&household_size).copied().unwrap_or(1.0)
    }
}
