//! Footprint calculator: lifestyle input in, emissions breakdown out.
//!
//! Each category is computed on its own, scaled by the household
//! multiplier, then summed. The calculator keeps no state: the same input
//! and factor table always give the same result, which is what lets the
//! scenario evaluator call it on every slider movement.
//!
//! ```
//! use carbonwise_logic::calculator::compute;
//! use carbonwise_logic::input::LifestyleInput;
//!
//! let result = compute(&LifestyleInput::default());
//! assert_eq!(result.annual.diet, 2500.0);
//! assert!(result.suggestions.len() <= 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::factors::{Baselines, EmissionFactors};
use crate::input::LifestyleInput;
use crate::suggestions::{suggest, Suggestion};

pub const DAYS_PER_YEAR: f64 = 365.0;
pub const WEEKS_PER_YEAR: f64 = 52.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Emission categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Transport,
    Flights,
    Diet,
    Energy,
    Shopping,
    Waste,
    Water,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Self::Transport,
            Self::Flights,
            Self::Diet,
            Self::Energy,
            Self::Shopping,
            Self::Waste,
            Self::Water,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Transport => "Transportation",
            Self::Flights => "Travel",
            Self::Diet => "Diet",
            Self::Energy => "Energy",
            Self::Shopping => "Shopping",
            Self::Waste => "Waste",
            Self::Water => "Water",
        }
    }
}

/// Per-category kg CO2e with the total of all categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionsBreakdown {
    pub transport: f64,
    pub flights: f64,
    pub diet: f64,
    pub energy: f64,
    pub shopping: f64,
    pub waste: f64,
    pub water: f64,
    pub total: f64,
}

impl EmissionsBreakdown {
    /// Build from category values; `total` is their sum.
    pub fn from_categories(
        transport: f64,
        flights: f64,
        diet: f64,
        energy: f64,
        shopping: f64,
        waste: f64,
        water: f64,
    ) -> Self {
        Self {
            transport,
            flights,
            diet,
            energy,
            shopping,
            waste,
            water,
            total: transport + flights + diet + energy + shopping + waste + water,
        }
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Transport => self.transport,
            Category::Flights => self.flights,
            Category::Diet => self.diet,
            Category::Energy => self.energy,
            Category::Shopping => self.shopping,
            Category::Waste => self.waste,
            Category::Water => self.water,
        }
    }

    pub fn categories(&self) -> Vec<(Category, f64)> {
        Category::all().iter().map(|c| (*c, self.get(*c))).collect()
    }

    /// Non-zero categories with their share of the total (0.0–1.0).
    pub fn category_shares(&self) -> Vec<(Category, f64)> {
        self.categories()
            .into_iter()
            .filter(|(_, v)| *v > 0.0)
            .map(|(c, v)| (c, safe_ratio(v, self.total)))
            .collect()
    }

    /// Every field divided by `divisor`.
    pub fn scaled_down(&self, divisor: f64) -> Self {
        Self {
            transport: self.transport / divisor,
            flights: self.flights / divisor,
            diet: self.diet / divisor,
            energy: self.energy / divisor,
            shopping: self.shopping / divisor,
            waste: self.waste / divisor,
            water: self.water / divisor,
            total: self.total / divisor,
        }
    }
}

/// Signed percent deviation from each baseline; negative is below it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparisons {
    pub vs_national_average: f64,
    pub vs_global_average: f64,
    pub vs_target: f64,
}

/// Complete calculation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionsResult {
    pub annual: EmissionsBreakdown,
    pub daily: EmissionsBreakdown,
    pub comparisons: Comparisons,
    pub suggestions: Vec<Suggestion>,
}

/// Compute a footprint with the standard factor table.
pub fn compute(input: &LifestyleInput) -> EmissionsResult {
    compute_with(input, EmissionFactors::standard())
}

/// Compute a footprint with an explicit factor table.
pub fn compute_with(input: &LifestyleInput, factors: &EmissionFactors) -> EmissionsResult {
    let annual = annual_breakdown(input, factors);
    let daily = annual.scaled_down(DAYS_PER_YEAR);
    let comparisons = compare(annual.total, &factors.baselines);
    let suggestions = suggest(input, &annual);

    log::debug!(
        "footprint: total={:.1} kg/yr (household={}, region={})",
        annual.total,
        input.household_size,
        input.state
    );

    EmissionsResult {
        annual,
        daily,
        comparisons,
        suggestions,
    }
}

/// Household-adjusted annual kg CO2e per category.
pub fn annual_breakdown(input: &LifestyleInput, factors: &EmissionFactors) -> EmissionsBreakdown {
    let household = factors.household_multiplier(input.household_size);

    EmissionsBreakdown::from_categories(
        transport_annual(input, factors) * household,
        flights_annual(input, factors) * household,
        diet_annual(input, factors) * household,
        energy_annual(input, factors) * household,
        shopping_annual(input, factors) * household,
        (waste_annual(input, factors) * household).max(0.0),
        water_annual(input, factors) * household,
    )
}

/// Reads a reported amount, treating non-finite or negative values as zero.
fn amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Reads a percentage as a 0.0–1.0 fraction.
fn fraction(percent: f64) -> f64 {
    amount(percent).min(100.0) / 100.0
}

fn safe_ratio(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        0.0
    } else {
        part / whole
    }
}

pub fn transport_annual(input: &LifestyleInput, factors: &EmissionFactors) -> f64 {
    input
        .commute
        .iter()
        .map(|c| {
            amount(c.miles_per_trip)
                * f64::from(c.days_per_week)
                * WEEKS_PER_YEAR
                * factors.transport_factor(c.mode)
        })
        .sum()
}

pub fn flights_annual(input: &LifestyleInput, factors: &EmissionFactors) -> f64 {
    input
        .flights
        .iter()
        .map(|f| {
            let distance = amount(f.distance_miles);
            distance
                * amount(f.trips_per_year)
                * factors.flight_factor(distance)
                * factors.cabin_multiplier(f.cabin_class)
        })
        .sum()
}

/// Fixed value for the diet profile. The detailed serving counts do not
/// feed in.
pub fn diet_annual(input: &LifestyleInput, factors: &EmissionFactors) -> f64 {
    factors.diet_annual(input.diet_profile)
}

pub fn energy_annual(input: &LifestyleInput, factors: &EmissionFactors) -> f64 {
    let e = &input.energy;
    let f = &factors.energy;
    let grid = factors.electricity_factor(&input.state);
    let fossil_share = 1.0 - fraction(input.energy_details.renewable_percent);

    amount(e.electricity_kwh) * MONTHS_PER_YEAR * grid * fossil_share
        + amount(e.natural_gas_therms) * MONTHS_PER_YEAR * f.natural_gas
        + amount(e.heating_oil_gallons) * MONTHS_PER_YEAR * f.heating_oil
        + amount(e.propane_gallons) * MONTHS_PER_YEAR * f.propane
}

pub fn shopping_annual(input: &LifestyleInput, factors: &EmissionFactors) -> f64 {
    let s = &input.shopping;
    let c = &factors.consumption;

    amount(s.clothing_spend) * c.clothing_kg_per_dollar * c.clothing_cotton
        + amount(s.electronics_spend) * c.devices_per_dollar * c.device
        + amount(s.general_spend) * c.general_goods
}

/// Unfloored: recycling and composting credits can push this below zero.
pub fn waste_annual(input: &LifestyleInput, factors: &EmissionFactors) -> f64 {
    let w = &input.waste;
    let f = &factors.waste;
    let recycled = fraction(w.recycle_percent);
    let composted = fraction(w.compost_percent);
    let remaining = 1.0 - recycled - composted;

    amount(w.total_kg)
        * WEEKS_PER_YEAR
        * (f.landfill * remaining + f.recycling * recycled + f.composting * composted)
}

pub fn water_annual(input: &LifestyleInput, factors: &EmissionFactors) -> f64 {
    let w = &input.water;
    let f = &factors.water;
    let shower_liters = amount(w.shower_minutes) * f.shower_liters_per_minute;

    DAYS_PER_YEAR
        * (amount(w.tap_liters) * f.tap
            + amount(w.bottled_liters) * f.bottled
            + shower_liters * f.hot_shower)
}

/// Signed percent change of `value` relative to `baseline` (0 for a zero
/// baseline).
pub fn percent_change(value: f64, baseline: f64) -> f64 {
    if baseline == 0.0 || !baseline.is_finite() {
        0.0
    } else {
        (value - baseline) / baseline * 100.0
    }
}

pub fn compare(total: f64, baselines: &Baselines) -> Comparisons {
    Comparisons {
        vs_national_average: percent_change(total, baselines.national_average),
        vs_global_average: percent_change(total, baselines.global_average),
        vs_target: percent_change(total, baselines.target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{CabinClass, CommuteEntry, DietProfile, FlightEntry, TransportMode};

    fn empty_input() -> LifestyleInput {
        LifestyleInput {
            commute: Vec::new(),
            ..LifestyleInput::default()
        }
    }

    #[test]
    fn gasoline_commute() {
        let mut input = empty_input();
        input.commute.push(CommuteEntry {
            mode: TransportMode::CarGasoline,
            miles_per_trip: 20.0,
            days_per_week: 5,
        });
        let t = transport_annual(&input, EmissionFactors::standard());
        assert!((t - 2100.8).abs() < 1e-9);
    }

    #[test]
    fn commute_entries_sum() {
        let mut input = empty_input();
        input.commute.push(CommuteEntry {
            mode: TransportMode::Bus,
            miles_per_trip: 10.0,
            days_per_week: 5,
        });
        input.commute.push(CommuteEntry {
            mode: TransportMode::Bike,
            miles_per_trip: 4.0,
            days_per_week: 2,
        });
        let t = transport_annual(&input, EmissionFactors::standard());
        assert!((t - 10.0 * 5.0 * 52.0 * 0.055).abs() < 1e-9);
    }

    #[test]
    fn unknown_mode_uses_fallback_factor() {
        let mut input = empty_input();
        input.commute.push(CommuteEntry {
            mode: TransportMode::Other,
            miles_per_trip: 10.0,
            days_per_week: 1,
        });
        let t = transport_annual(&input, EmissionFactors::standard());
        assert!((t - 10.0 * 52.0 * 0.4).abs() < 1e-9);
    }

    #[test]
    fn flights_by_class() {
        let mut input = empty_input();
        input.flights.push(FlightEntry {
            distance_miles: 3000.0,
            trips_per_year: 2.0,
            cabin_class: CabinClass::Economy,
        });
        let economy = flights_annual(&input, EmissionFactors::standard());
        assert!((economy - 978.0).abs() < 1e-9);

        input.flights[0].cabin_class = CabinClass::First;
        let first = flights_annual(&input, EmissionFactors::standard());
        assert!((first - 2934.0).abs() < 1e-9);
    }

    #[test]
    fn short_flight_tier() {
        let mut input = empty_input();
        input.flights.push(FlightEntry {
            distance_miles: 250.0,
            trips_per_year: 4.0,
            cabin_class: CabinClass::Business,
        });
        let f = flights_annual(&input, EmissionFactors::standard());
        assert!((f - 250.0 * 4.0 * 0.207 * 2.0).abs() < 1e-9);
    }

    #[test]
    fn diet_is_profile_lookup() {
        let mut input = empty_input();
        input.diet_profile = DietProfile::Vegetarian;
        input.diet_details.beef_servings_per_week = 14.0;
        assert_eq!(diet_annual(&input, EmissionFactors::standard()), 1200.0);
    }

    #[test]
    fn energy_uses_region_and_renewables() {
        let mut input = empty_input();
        input.state = "CA".to_string();
        input.energy.electricity_kwh = 800.0;
        input.energy.natural_gas_therms = 50.0;
        let f = EmissionFactors::standard();
        let full = energy_annual(&input, f);
        assert!((full - (800.0 * 12.0 * 0.237 + 50.0 * 12.0 * 5.3)).abs() < 1e-9);

        input.energy_details.renewable_percent = 100.0;
        let green = energy_annual(&input, f);
        assert!((green - 50.0 * 12.0 * 5.3).abs() < 1e-9);
    }

    #[test]
    fn energy_unknown_region_uses_average() {
        let mut input = empty_input();
        input.state = "Atlantis".to_string();
        input.energy.electricity_kwh = 100.0;
        let e = energy_annual(&input, EmissionFactors::standard());
        assert!((e - 100.0 * 12.0 * 0.386).abs() < 1e-9);
    }

    #[test]
    fn heating_fuels() {
        let mut input = empty_input();
        input.energy.heating_oil_gallons = 10.0;
        input.energy.propane_gallons = 5.0;
        let e = energy_annual(&input, EmissionFactors::standard());
        assert!((e - (10.0 * 12.0 * 10.18 + 5.0 * 12.0 * 5.7)).abs() < 1e-9);
    }

    #[test]
    fn shopping_proxies() {
        let mut input = empty_input();
        input.shopping.clothing_spend = 1000.0;
        input.shopping.electronics_spend = 500.0;
        input.shopping.general_spend = 2000.0;
        let s = shopping_annual(&input, EmissionFactors::standard());
        assert!((s - (250.0 + 80.0 + 600.0)).abs() < 1e-9);
    }

    #[test]
    fn waste_all_landfill() {
        let mut input = empty_input();
        input.waste.total_kg = 10.0;
        let w = waste_annual(&input, EmissionFactors::standard());
        assert!((w - 10.0 * 52.0 * 0.8).abs() < 1e-9);
    }

    #[test]
    fn fully_diverted_waste_floors_at_zero() {
        let mut input = empty_input();
        input.waste.total_kg = 10.0;
        input.waste.recycle_percent = 50.0;
        input.waste.compost_percent = 50.0;
        assert!(waste_annual(&input, EmissionFactors::standard()) < 0.0);
        assert_eq!(compute(&input).annual.waste, 0.0);
    }

    #[test]
    fn water_shower_flow() {
        let mut input = empty_input();
        input.water.tap_liters = 2.0;
        input.water.bottled_liters = 1.0;
        input.water.shower_minutes = 8.0;
        let w = water_annual(&input, EmissionFactors::standard());
        let expected = 365.0 * (2.0 * 0.0005 + 1.0 * 0.25 + 8.0 * 10.0 * 0.15);
        assert!((w - expected).abs() < 1e-9);
    }

    #[test]
    fn household_multiplier_applies_to_every_category() {
        let mut input = empty_input();
        input.energy.electricity_kwh = 500.0;
        input.water.shower_minutes = 5.0;
        let single = compute(&input).annual;
        input.household_size = 2;
        let pair = compute(&input).annual;
        assert!((pair.diet - single.diet * 0.85).abs() < 1e-9);
        assert!((pair.energy - single.energy * 0.85).abs() < 1e-9);
        assert!((pair.water - single.water * 0.85).abs() < 1e-9);
    }

    #[test]
    fn large_household_has_no_discount() {
        let mut input = empty_input();
        input.household_size = 8;
        assert_eq!(compute(&input).annual.diet, 2500.0);
    }

    #[test]
    fn total_is_exact_sum() {
        let mut input = empty_input();
        input.commute.push(CommuteEntry {
            mode: TransportMode::CarDiesel,
            miles_per_trip: 13.3,
            days_per_week: 3,
        });
        input.energy.electricity_kwh = 612.0;
        input.shopping.general_spend = 1234.5;
        input.waste.total_kg = 7.0;
        input.waste.recycle_percent = 30.0;
        let a = compute(&input).annual;
        let sum = a.transport + a.flights + a.diet + a.energy + a.shopping + a.waste + a.water;
        assert_eq!(a.total, sum);
    }

    #[test]
    fn daily_is_annual_over_365() {
        let mut input = empty_input();
        input.energy.electricity_kwh = 700.0;
        let r = compute(&input);
        for c in Category::all() {
            assert_eq!(r.daily.get(*c), r.annual.get(*c) / 365.0);
        }
        assert_eq!(r.daily.total, r.annual.total / 365.0);
    }

    #[test]
    fn comparisons_against_baselines() {
        let c = compare(4800.0, &EmissionFactors::standard().baselines);
        assert!((c.vs_global_average).abs() < 1e-9);
        assert!((c.vs_national_average - (-70.0)).abs() < 1e-9);
        assert!(c.vs_target > 0.0);
    }

    #[test]
    fn zero_baseline_is_zero_percent() {
        assert_eq!(percent_change(100.0, 0.0), 0.0);
    }

    #[test]
    fn bad_numbers_read_as_zero() {
        let mut input = empty_input();
        input.energy.electricity_kwh = f64::NAN;
        input.shopping.general_spend = -500.0;
        input.water.tap_liters = f64::INFINITY;
        let r = compute(&input);
        assert!(r.annual.total.is_finite());
        assert_eq!(r.annual.energy, 0.0);
        assert_eq!(r.annual.shopping, 0.0);
        assert_eq!(r.annual.water, 0.0);
    }

    #[test]
    fn shares_skip_empty_categories() {
        let mut input = empty_input();
        input.energy.electricity_kwh = 100.0;
        let r = compute(&input);
        let shares = r.annual.category_shares();
        assert_eq!(shares.len(), 2);
        let sum: f64 = shares.iter().map(|(_, s)| s).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn result_survives_json() {
        let mut input = empty_input();
        input.energy.electricity_kwh = 900.0;
        let r = compute(&input);
        let json = serde_json::to_string(&r).unwrap();
        let back: EmissionsResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
