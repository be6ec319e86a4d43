//! Lifestyle input model: the self-reported household profile.
//!
//! The wizard builds a [`LifestyleInput`] step by step; this module owns the
//! data model plus the input-layer rules the calculator relies on:
//!
//! - [`sanitize`] clamps every numeric field into the range the wizard
//!   accepts (non-finite or negative values become zero)
//! - [`validate_input`] reports every problem found, without stopping at the
//!   first one
//!
//! Optional detail sections carry wizard defaults, so a partial JSON record
//! deserializes into a fully populated input.
//!
//! ```
//! use carbonwise_logic::input::{sanitize, validate_input, LifestyleInput};
//!
//! let mut input = LifestyleInput::default();
//! input.energy.electricity_kwh = -40.0;
//! assert!(!validate_input(&input).is_empty());
//! assert!(validate_input(&sanitize(&input)).is_empty());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::factors::EmissionFactors;

/// Upper bounds accepted by the input layer.
pub mod limits {
    pub const HOUSEHOLD_MIN: u8 = 1;
    pub const HOUSEHOLD_MAX: u8 = 8;
    pub const MILES_PER_TRIP: f64 = 500.0;
    pub const DAYS_PER_WEEK: u8 = 7;
    /// Roughly half the Earth's circumference.
    pub const FLIGHT_DISTANCE_MILES: f64 = 12_500.0;
    pub const FLIGHT_TRIPS_PER_YEAR: f64 = 50.0;
    pub const SERVINGS_PER_WEEK: f64 = 21.0;
    pub const DAIRY_PER_DAY: f64 = 10.0;
    pub const ELECTRICITY_KWH: f64 = 5000.0;
    pub const NATURAL_GAS_THERMS: f64 = 500.0;
    pub const FUEL_GALLONS: f64 = 500.0;
    pub const HOME_SIZE_SQFT: f64 = 20_000.0;
    pub const CLOTHING_SPEND: f64 = 10_000.0;
    pub const ELECTRONICS_SPEND: f64 = 20_000.0;
    pub const GENERAL_SPEND: f64 = 50_000.0;
    pub const CLOTHING_ITEMS: f64 = 200.0;
    pub const REPLACEMENT_YEARS: f64 = 30.0;
    pub const PACKAGES_PER_MONTH: f64 = 100.0;
    pub const WASTE_KG: f64 = 200.0;
    pub const TAP_LITERS: f64 = 1000.0;
    pub const BOTTLED_LITERS: f64 = 20.0;
    pub const SHOWER_MINUTES: f64 = 60.0;
    pub const PERCENT: f64 = 100.0;
}

/// Commute mode. Unrecognized keys deserialize as [`TransportMode::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    CarGasoline,
    CarDiesel,
    CarHybrid,
    CarElectric,
    Motorcycle,
    Bus,
    TrainCommuter,
    TrainIntercity,
    #[serde(alias = "train_subway")]
    Subway,
    Bike,
    Walk,
    Rideshare,
    Taxi,
    Carpool,
    #[serde(other)]
    Other,
}

impl TransportMode {
    pub fn all() -> &'static [TransportMode] {
        &[
            Self::CarGasoline,
            Self::CarDiesel,
            Self::CarHybrid,
            Self::CarElectric,
            Self::Motorcycle,
            Self::Bus,
            Self::TrainCommuter,
            Self::TrainIntercity,
            Self::Subway,
            Self::Bike,
            Self::Walk,
            Self::Rideshare,
            Self::Taxi,
            Self::Carpool,
            Self::Other,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::CarGasoline => "car_gasoline",
            Self::CarDiesel => "car_diesel",
            Self::CarHybrid => "car_hybrid",
            Self::CarElectric => "car_electric",
            Self::Motorcycle => "motorcycle",
            Self::Bus => "bus",
            Self::TrainCommuter => "train_commuter",
            Self::TrainIntercity => "train_intercity",
            Self::Subway => "subway",
            Self::Bike => "bike",
            Self::Walk => "walk",
            Self::Rideshare => "rideshare",
            Self::Taxi => "taxi",
            Self::Carpool => "carpool",
            Self::Other => "other",
        }
    }

    /// Private car travel, the target of the "reduce driving" lever.
    pub fn is_car_like(&self) -> bool {
        matches!(
            self,
            Self::CarGasoline | Self::CarDiesel | Self::CarHybrid | Self::CarElectric | Self::Carpool
        )
    }
}

/// Cabin class. Anything unrecognized is priced as economy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    Business,
    First,
    #[default]
    #[serde(other)]
    Economy,
}

/// Coarse diet profile selecting a fixed annual diet footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietProfile {
    HeavyMeat,
    #[default]
    AverageOmnivore,
    LowMeat,
    Pescatarian,
    Vegetarian,
    Vegan,
    #[serde(other)]
    Other,
}

impl DietProfile {
    /// Profiles that trigger the plant-based suggestion. `Other` is priced
    /// as average omnivore, so it counts here too.
    pub fn is_meat_heavy(&self) -> bool {
        matches!(self, Self::HeavyMeat | Self::AverageOmnivore | Self::Other)
    }
}

/// One regularly used commute mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommuteEntry {
    pub mode: TransportMode,
    pub miles_per_trip: f64,
    pub days_per_week: u8,
}

/// A recurring flight (each trip counted one-way).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightEntry {
    pub distance_miles: f64,
    pub trips_per_year: f64,
    #[serde(default)]
    pub cabin_class: CabinClass,
}

/// Fine-grained diet answers. Collected for display and scenarios; the
/// annual diet figure comes from [`DietProfile`] alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DietDetails {
    pub beef_servings_per_week: f64,
    pub pork_servings_per_week: f64,
    pub chicken_servings_per_week: f64,
    pub fish_servings_per_week: f64,
    pub lamb_servings_per_week: f64,
    pub dairy_servings_per_day: f64,
    pub eggs_per_week: f64,
    pub local_food_percent: f64,
    pub organic_food_percent: f64,
    pub processed_food_percent: f64,
    pub food_waste_percent: f64,
}

impl Default for DietDetails {
    fn default() -> Self {
        Self {
            beef_servings_per_week: 3.0,
            pork_servings_per_week: 2.0,
            chicken_servings_per_week: 4.0,
            fish_servings_per_week: 2.0,
            lamb_servings_per_week: 0.0,
            dairy_servings_per_day: 3.0,
            eggs_per_week: 6.0,
            local_food_percent: 20.0,
            organic_food_percent: 10.0,
            processed_food_percent: 40.0,
            food_waste_percent: 25.0,
        }
    }
}

/// Monthly home energy use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyUse {
    pub electricity_kwh: f64,
    pub natural_gas_therms: f64,
    pub heating_oil_gallons: f64,
    pub propane_gallons: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyDetails {
    pub home_type: String,
    pub home_size_sqft: f64,
    pub heating_type: String,
    pub cooling_type: String,
    pub water_heater_type: String,
    /// Share of electricity assumed carbon-free (0–100).
    pub renewable_percent: f64,
    pub efficiency_rating: String,
}

impl Default for EnergyDetails {
    fn default() -> Self {
        Self {
            home_type: "apartment".to_string(),
            home_size_sqft: 1200.0,
            heating_type: "gas".to_string(),
            cooling_type: "electric".to_string(),
            water_heater_type: "gas".to_string(),
            renewable_percent: 0.0,
            efficiency_rating: "average".to_string(),
        }
    }
}

/// Annual spend in currency units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShoppingSpend {
    pub clothing_spend: f64,
    pub electronics_spend: f64,
    pub general_spend: f64,
}

/// Purchasing habits. Collected, not part of the calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShoppingDetails {
    pub new_clothing_items: f64,
    pub secondhand_clothing_percent: f64,
    pub electronics_replacement_years: f64,
    pub car_replacement_years: f64,
    pub repair_vs_replace_percent: f64,
    pub packages_per_month: f64,
    pub local_shopping_percent: f64,
}

impl Default for ShoppingDetails {
    fn default() -> Self {
        Self {
            new_clothing_items: 20.0,
            secondhand_clothing_percent: 10.0,
            electronics_replacement_years: 4.0,
            car_replacement_years: 10.0,
            repair_vs_replace_percent: 30.0,
            packages_per_month: 8.0,
            local_shopping_percent: 40.0,
        }
    }
}

/// Weekly household waste.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WasteHabits {
    pub total_kg: f64,
    pub recycle_percent: f64,
    pub compost_percent: f64,
}

/// Daily water use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterUse {
    pub tap_liters: f64,
    pub bottled_liters: f64,
    pub shower_minutes: f64,
}

/// The complete self-reported profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifestyleInput {
    pub household_size: u8,
    /// Region code (US state) selecting the electricity factor.
    pub state: String,
    pub commute: Vec<CommuteEntry>,
    pub flights: Vec<FlightEntry>,
    pub diet_profile: DietProfile,
    pub diet_details: DietDetails,
    pub energy: EnergyUse,
    pub energy_details: EnergyDetails,
    pub shopping: ShoppingSpend,
    pub shopping_details: ShoppingDetails,
    pub waste: WasteHabits,
    pub water: WaterUse,
}

impl Default for LifestyleInput {
    fn default() -> Self {
        Self {
            household_size: 1,
            state: "CA".to_string(),
            commute: vec![CommuteEntry {
                mode: TransportMode::CarGasoline,
                miles_per_trip: 0.0,
                days_per_week: 5,
            }],
            flights: Vec::new(),
            diet_profile: DietProfile::AverageOmnivore,
            diet_details: DietDetails::default(),
            energy: EnergyUse::default(),
            energy_details: EnergyDetails::default(),
            shopping: ShoppingSpend::default(),
            shopping_details: ShoppingDetails::default(),
            waste: WasteHabits::default(),
            water: WaterUse::default(),
        }
    }
}

/// Clamp to `0..=max`; NaN, infinities and negatives become zero.
pub fn clamp_amount(value: f64, max: f64) -> f64 {
    if !value.is_finite() || value < 0.0 {
        0.0
    } else {
        value.min(max)
    }
}

/// Normalize every numeric field into the accepted range.
///
/// Returns a fresh record; the argument is left untouched.
pub fn sanitize(input: &LifestyleInput) -> LifestyleInput {
    use limits::*;

    let mut out = input.clone();
    out.household_size = input.household_size.clamp(HOUSEHOLD_MIN, HOUSEHOLD_MAX);
    out.state = input.state.trim().to_ascii_uppercase();

    for c in &mut out.commute {
        c.miles_per_trip = clamp_amount(c.miles_per_trip, MILES_PER_TRIP);
        c.days_per_week = c.days_per_week.min(DAYS_PER_WEEK);
    }
    for f in &mut out.flights {
        f.distance_miles = clamp_amount(f.distance_miles, FLIGHT_DISTANCE_MILES);
        f.trips_per_year = clamp_amount(f.trips_per_year, FLIGHT_TRIPS_PER_YEAR);
    }

    let d = &mut out.diet_details;
    d.beef_servings_per_week = clamp_amount(d.beef_servings_per_week, SERVINGS_PER_WEEK);
    d.pork_servings_per_week = clamp_amount(d.pork_servings_per_week, SERVINGS_PER_WEEK);
    d.chicken_servings_per_week = clamp_amount(d.chicken_servings_per_week, SERVINGS_PER_WEEK);
    d.fish_servings_per_week = clamp_amount(d.fish_servings_per_week, SERVINGS_PER_WEEK);
    d.lamb_servings_per_week = clamp_amount(d.lamb_servings_per_week, SERVINGS_PER_WEEK);
    d.dairy_servings_per_day = clamp_amount(d.dairy_servings_per_day, DAIRY_PER_DAY);
    d.eggs_per_week = clamp_amount(d.eggs_per_week, SERVINGS_PER_WEEK);
    d.local_food_percent = clamp_amount(d.local_food_percent, PERCENT);
    d.organic_food_percent = clamp_amount(d.organic_food_percent, PERCENT);
    d.processed_food_percent = clamp_amount(d.processed_food_percent, PERCENT);
    d.food_waste_percent = clamp_amount(d.food_waste_percent, PERCENT);

    let e = &mut out.energy;
    e.electricity_kwh = clamp_amount(e.electricity_kwh, ELECTRICITY_KWH);
    e.natural_gas_therms = clamp_amount(e.natural_gas_therms, NATURAL_GAS_THERMS);
    e.heating_oil_gallons = clamp_amount(e.heating_oil_gallons, FUEL_GALLONS);
    e.propane_gallons = clamp_amount(e.propane_gallons, FUEL_GALLONS);
    out.energy_details.home_size_sqft = clamp_amount(out.energy_details.home_size_sqft, HOME_SIZE_SQFT);
    out.energy_details.renewable_percent =
        clamp_amount(out.energy_details.renewable_percent, PERCENT);

    let s = &mut out.shopping;
    s.clothing_spend = clamp_amount(s.clothing_spend, CLOTHING_SPEND);
    s.electronics_spend = clamp_amount(s.electronics_spend, ELECTRONICS_SPEND);
    s.general_spend = clamp_amount(s.general_spend, GENERAL_SPEND);

    let sd = &mut out.shopping_details;
    sd.new_clothing_items = clamp_amount(sd.new_clothing_items, CLOTHING_ITEMS);
    sd.secondhand_clothing_percent = clamp_amount(sd.secondhand_clothing_percent, PERCENT);
    sd.electronics_replacement_years =
        clamp_amount(sd.electronics_replacement_years, REPLACEMENT_YEARS);
    sd.car_replacement_years = clamp_amount(sd.car_replacement_years, REPLACEMENT_YEARS);
    sd.repair_vs_replace_percent = clamp_amount(sd.repair_vs_replace_percent, PERCENT);
    sd.packages_per_month = clamp_amount(sd.packages_per_month, PACKAGES_PER_MONTH);
    sd.local_shopping_percent = clamp_amount(sd.local_shopping_percent, PERCENT);

    let w = &mut out.waste;
    w.total_kg = clamp_amount(w.total_kg, WASTE_KG);
    w.recycle_percent = clamp_amount(w.recycle_percent, PERCENT);
    // Compost can only claim what recycling left over.
    w.compost_percent = clamp_amount(w.compost_percent, PERCENT - w.recycle_percent);

    let wt = &mut out.water;
    wt.tap_liters = clamp_amount(wt.tap_liters, TAP_LITERS);
    wt.bottled_liters = clamp_amount(wt.bottled_liters, BOTTLED_LITERS);
    wt.shower_minutes = clamp_amount(wt.shower_minutes, SHOWER_MINUTES);

    out
}

/// Problem found in a lifestyle input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    HouseholdSizeOutOfRange(u8),
    /// Region code missing from the factor table (national average applies).
    UnknownRegion(String),
    /// Commute entry at this index has an unrecognized mode.
    UnknownTransportMode(usize),
    DaysPerWeekOutOfRange { index: usize, days: u8 },
    /// Negative or non-finite value.
    InvalidNumber { field: String, value: f64 },
    PercentOutOfRange { field: String, value: f64 },
    /// Recycled plus composted share above 100%.
    DiversionExceedsTotal(f64),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::HouseholdSizeOutOfRange(n) => {
                write!(f, "household size {} outside 1..=8", n)
            }
            InputError::UnknownRegion(code) => write!(f, "unknown region code '{}'", code),
            InputError::UnknownTransportMode(i) => write!(f, "commute entry {} has unknown mode", i),
            InputError::DaysPerWeekOutOfRange { index, days } => {
                write!(f, "commute entry {} uses {} days per week", index, days)
            }
            InputError::InvalidNumber { field, value } => {
                write!(f, "{} must be a non-negative number, got {}", field, value)
            }
            InputError::PercentOutOfRange { field, value } => {
                write!(f, "{} must be within 0..=100, got {}", field, value)
            }
            InputError::DiversionExceedsTotal(sum) => {
                write!(f, "recycled + composted share is {}%, above 100%", sum)
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Validate a lifestyle input against the standard factor table.
pub fn validate_input(input: &LifestyleInput) -> Vec<InputError> {
    validate_input_with(input, EmissionFactors::standard())
}

/// Validate a lifestyle input, returning all errors found.
pub fn validate_input_with(input: &LifestyleInput, factors: &EmissionFactors) -> Vec<InputError> {
    let mut errors = Vec::new();

    if !(limits::HOUSEHOLD_MIN..=limits::HOUSEHOLD_MAX).contains(&input.household_size) {
        errors.push(InputError::HouseholdSizeOutOfRange(input.household_size));
    }
    if factors.region_factor(&input.state).is_none() {
        errors.push(InputError::UnknownRegion(input.state.clone()));
    }

    for (i, c) in input.commute.iter().enumerate() {
        if c.mode == TransportMode::Other {
            errors.push(InputError::UnknownTransportMode(i));
        }
        if c.days_per_week > limits::DAYS_PER_WEEK {
            errors.push(InputError::DaysPerWeekOutOfRange {
                index: i,
                days: c.days_per_week,
            });
        }
    }

    let mut amounts: Vec<(String, f64)> = Vec::new();
    for (i, c) in input.commute.iter().enumerate() {
        amounts.push((format!("commute[{i}].miles_per_trip"), c.miles_per_trip));
    }
    for (i, fl) in input.flights.iter().enumerate() {
        amounts.push((format!("flights[{i}].distance_miles"), fl.distance_miles));
        amounts.push((format!("flights[{i}].trips_per_year"), fl.trips_per_year));
    }
    let e = &input.energy;
    let s = &input.shopping;
    let wt = &input.water;
    for (name, value) in [
        ("energy.electricity_kwh", e.electricity_kwh),
        ("energy.natural_gas_therms", e.natural_gas_therms),
        ("energy.heating_oil_gallons", e.heating_oil_gallons),
        ("energy.propane_gallons", e.propane_gallons),
        ("shopping.clothing_spend", s.clothing_spend),
        ("shopping.electronics_spend", s.electronics_spend),
        ("shopping.general_spend", s.general_spend),
        ("waste.total_kg", input.waste.total_kg),
        ("water.tap_liters", wt.tap_liters),
        ("water.bottled_liters", wt.bottled_liters),
        ("water.shower_minutes", wt.shower_minutes),
    ] {
        amounts.push((name.to_string(), value));
    }
    for (field, value) in amounts {
        if !value.is_finite() || value < 0.0 {
            errors.push(InputError::InvalidNumber { field, value });
        }
    }

    for (field, value) in [
        ("energy_details.renewable_percent", input.energy_details.renewable_percent),
        ("waste.recycle_percent", input.waste.recycle_percent),
        ("waste.compost_percent", input.waste.compost_percent),
    ] {
        if !value.is_finite() || !(0.0..=limits::PERCENT).contains(&value) {
            errors.push(InputError::PercentOutOfRange {
                field: field.to_string(),
                value,
            });
        }
    }

    let diverted = input.waste.recycle_percent + input.waste.compost_percent;
    if diverted > limits::PERCENT {
        errors.push(InputError::DiversionExceedsTotal(diverted));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_input_is_valid() {
        let errors = validate_input(&LifestyleInput::default());
        assert!(errors.is_empty(), "default input should be valid: {errors:?}");
    }

    #[test]
    fn household_out_of_range() {
        let mut input = LifestyleInput::default();
        input.household_size = 0;
        assert!(validate_input(&input).contains(&InputError::HouseholdSizeOutOfRange(0)));
        input.household_size = 9;
        assert!(validate_input(&input).contains(&InputError::HouseholdSizeOutOfRange(9)));
    }

    #[test]
    fn unknown_region_reported() {
        let mut input = LifestyleInput::default();
        input.state = "XX".to_string();
        assert!(validate_input(&input).contains(&InputError::UnknownRegion("XX".to_string())));
    }

    #[test]
    fn negative_and_nan_reported() {
        let mut input = LifestyleInput::default();
        input.energy.electricity_kwh = -1.0;
        input.water.shower_minutes = f64::NAN;
        let errors = validate_input(&input);
        let invalid = errors
            .iter()
            .filter(|e| matches!(e, InputError::InvalidNumber { .. }))
            .count();
        assert_eq!(invalid, 2);
    }

    #[test]
    fn diversion_over_hundred() {
        let mut input = LifestyleInput::default();
        input.waste.recycle_percent = 70.0;
        input.waste.compost_percent = 40.0;
        assert!(validate_input(&input).contains(&InputError::DiversionExceedsTotal(110.0)));
    }

    #[test]
    fn collects_every_error() {
        let mut input = LifestyleInput::default();
        input.household_size = 12;
        input.state = "??".to_string();
        input.commute[0].mode = TransportMode::Other;
        input.commute[0].days_per_week = 9;
        assert_eq!(validate_input(&input).len(), 4);
    }

    #[test]
    fn sanitize_clamps_and_zeroes() {
        let mut input = LifestyleInput::default();
        input.household_size = 0;
        input.state = " ny ".to_string();
        input.commute[0].miles_per_trip = 9000.0;
        input.commute[0].days_per_week = 10;
        input.energy.electricity_kwh = f64::INFINITY;
        input.energy.natural_gas_therms = -3.0;
        input.waste.recycle_percent = 80.0;
        input.waste.compost_percent = 60.0;
        input.water.bottled_liters = f64::NAN;

        let clean = sanitize(&input);
        assert_eq!(clean.household_size, 1);
        assert_eq!(clean.state, "NY");
        assert_eq!(clean.commute[0].miles_per_trip, limits::MILES_PER_TRIP);
        assert_eq!(clean.commute[0].days_per_week, 7);
        assert_eq!(clean.energy.electricity_kwh, 0.0);
        assert_eq!(clean.energy.natural_gas_therms, 0.0);
        assert_eq!(clean.waste.recycle_percent, 80.0);
        assert_eq!(clean.waste.compost_percent, 20.0);
        assert_eq!(clean.water.bottled_liters, 0.0);
        assert!(validate_input(&clean).is_empty());
    }

    #[test]
    fn flight_trips_share_one_cap_across_tiers() {
        let mut input = LifestyleInput::default();
        for distance in [200.0, 1500.0, 6000.0] {
            input.flights.push(FlightEntry {
                distance_miles: distance,
                trips_per_year: 80.0,
                cabin_class: CabinClass::Economy,
            });
        }
        let clean = sanitize(&input);
        for f in &clean.flights {
            assert_eq!(f.trips_per_year, limits::FLIGHT_TRIPS_PER_YEAR);
        }
    }

    #[test]
    fn sanitize_leaves_original_alone() {
        let mut input = LifestyleInput::default();
        input.energy.electricity_kwh = -5.0;
        let snapshot = input.clone();
        let _ = sanitize(&input);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn transport_mode_keys_match_serde_names() {
        for mode in TransportMode::all() {
            let json = serde_json::to_string(mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.key()));
        }
    }

    #[test]
    fn car_like_modes() {
        let car_like: Vec<_> = TransportMode::all()
            .iter()
            .filter(|m| m.is_car_like())
            .collect();
        assert_eq!(car_like.len(), 5);
        assert!(!TransportMode::Rideshare.is_car_like());
        assert!(TransportMode::Carpool.is_car_like());
    }

    #[test]
    fn unknown_enum_values_deserialize_to_fallbacks() {
        let json = r#"{
            "household_size": 2,
            "state": "TX",
            "commute": [{"mode": "jetpack", "miles_per_trip": 3, "days_per_week": 2}],
            "flights": [{"distance_miles": 500, "trips_per_year": 1, "cabin_class": "premium_economy"}],
            "diet_profile": "fruitarian"
        }"#;
        let input: LifestyleInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.commute[0].mode, TransportMode::Other);
        assert_eq!(input.flights[0].cabin_class, CabinClass::Economy);
        assert_eq!(input.diet_profile, DietProfile::Other);
    }

    #[test]
    fn cabin_class_round_trips_and_defaults() {
        for class in [CabinClass::Economy, CabinClass::Business, CabinClass::First] {
            let json = serde_json::to_string(&class).unwrap();
            assert_eq!(serde_json::from_str::<CabinClass>(&json).unwrap(), class);
        }
        assert_eq!(CabinClass::default(), CabinClass::Economy);
        let entry: FlightEntry =
            serde_json::from_str(r#"{"distance_miles": 900, "trips_per_year": 1}"#).unwrap();
        assert_eq!(entry.cabin_class, CabinClass::Economy);
    }

    #[test]
    fn unknown_diet_counts_as_meat_heavy() {
        assert!(DietProfile::Other.is_meat_heavy());
        assert!(DietProfile::AverageOmnivore.is_meat_heavy());
        assert!(!DietProfile::Vegetarian.is_meat_heavy());
    }

    #[test]
    fn missing_sections_take_defaults() {
        let input: LifestyleInput = serde_json::from_str(r#"{"household_size": 3}"#).unwrap();
        assert_eq!(input.household_size, 3);
        assert_eq!(input.state, "CA");
        assert_eq!(input.diet_details, DietDetails::default());
        assert_eq!(input.energy_details.renewable_percent, 0.0);
        assert_eq!(input.shopping_details, ShoppingDetails::default());
    }

    #[test]
    fn subway_alias_accepted() {
        let entry: CommuteEntry =
            serde_json::from_str(r#"{"mode": "train_subway", "miles_per_trip": 4, "days_per_week": 5}"#)
                .unwrap();
        assert_eq!(entry.mode, TransportMode::Subway);
    }
}
