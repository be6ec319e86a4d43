//! What-if scenarios: recompute a footprint under hypothetical changes.
//!
//! A scenario is a set of independent levers. Applying them never touches
//! the original input: every adjusted field is derived from the original
//! value, so moving one slider after another gives the combined effect of
//! the current lever values instead of compounding on earlier positions.
//!
//! ```
//! use carbonwise_logic::calculator::compute;
//! use carbonwise_logic::input::LifestyleInput;
//! use carbonwise_logic::scenario::{evaluate, ScenarioLevers};
//!
//! let mut input = LifestyleInput::default();
//! input.energy.electricity_kwh = 900.0;
//! let result = compute(&input);
//!
//! let levers = ScenarioLevers {
//!     renewable_percent: Some(100.0),
//!     ..ScenarioLevers::default()
//! };
//! let outcome = evaluate(&input, &result, &levers);
//! assert!(outcome.total_delta_kg_per_year > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculator::{compute_with, EmissionsResult};
use crate::factors::EmissionFactors;
use crate::input::LifestyleInput;

/// Slider ranges (percent).
pub mod ranges {
    pub const RENEWABLE_MAX: f64 = 100.0;
    pub const DRIVING_MAX: f64 = 100.0;
    pub const MEAT_MAX: f64 = 100.0;
    pub const SHOPPING_MAX: f64 = 50.0;
}

/// Hypothetical behavior changes. The default leaves everything as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioLevers {
    /// Replaces the renewable electricity share when set.
    pub renewable_percent: Option<f64>,
    /// Cut in miles for every car-like commute mode.
    pub reduce_driving_percent: f64,
    /// Cut in weekly beef, pork, chicken and lamb servings.
    pub reduce_meat_percent: f64,
    /// Cut in clothing, electronics and general spend.
    pub reduce_shopping_percent: f64,
}

/// A single lever, for per-lever attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lever {
    RenewableEnergy,
    ReduceDriving,
    ReduceMeat,
    ReduceShopping,
}

impl Lever {
    pub fn all() -> &'static [Lever] {
        &[
            Self::RenewableEnergy,
            Self::ReduceDriving,
            Self::ReduceMeat,
            Self::ReduceShopping,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::RenewableEnergy => "Switch to Renewable Energy",
            Self::ReduceDriving => "Reduce Driving",
            Self::ReduceMeat => "Reduce Meat Consumption",
            Self::ReduceShopping => "Reduce Shopping",
        }
    }
}

impl ScenarioLevers {
    /// True when no lever would change the input.
    pub fn is_inactive(&self) -> bool {
        Lever::all().iter().all(|l| !self.is_active(*l))
    }

    pub fn is_active(&self, lever: Lever) -> bool {
        match lever {
            Lever::RenewableEnergy => self.renewable_percent.is_some(),
            Lever::ReduceDriving => percent(self.reduce_driving_percent, ranges::DRIVING_MAX) > 0.0,
            Lever::ReduceMeat => percent(self.reduce_meat_percent, ranges::MEAT_MAX) > 0.0,
            Lever::ReduceShopping => {
                percent(self.reduce_shopping_percent, ranges::SHOPPING_MAX) > 0.0
            }
        }
    }

    /// Only `lever` kept; every other lever at its default.
    pub fn isolate(&self, lever: Lever) -> ScenarioLevers {
        let mut only = ScenarioLevers::default();
        match lever {
            Lever::RenewableEnergy => only.renewable_percent = self.renewable_percent,
            Lever::ReduceDriving => only.reduce_driving_percent = self.reduce_driving_percent,
            Lever::ReduceMeat => only.reduce_meat_percent = self.reduce_meat_percent,
            Lever::ReduceShopping => only.reduce_shopping_percent = self.reduce_shopping_percent,
        }
        only
    }
}

/// Annual kg CO2e saved by each lever applied alone (positive = saving).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LeverDeltas {
    pub renewable_energy: f64,
    pub reduce_driving: f64,
    pub reduce_meat: f64,
    pub reduce_shopping: f64,
}

impl LeverDeltas {
    pub fn get(&self, lever: Lever) -> f64 {
        match lever {
            Lever::RenewableEnergy => self.renewable_energy,
            Lever::ReduceDriving => self.reduce_driving,
            Lever::ReduceMeat => self.reduce_meat,
            Lever::ReduceShopping => self.reduce_shopping,
        }
    }

    fn set(&mut self, lever: Lever, value: f64) {
        match lever {
            Lever::RenewableEnergy => self.renewable_energy = value,
            Lever::ReduceDriving => self.reduce_driving = value,
            Lever::ReduceMeat => self.reduce_meat = value,
            Lever::ReduceShopping => self.reduce_shopping = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub modified_input: LifestyleInput,
    pub modified_result: EmissionsResult,
    /// `original − modified` annual total; positive means a reduction.
    pub total_delta_kg_per_year: f64,
    /// Delta as a percentage of the original total (0 when that is 0).
    pub percent_delta: f64,
    pub per_lever_delta_kg_per_year: LeverDeltas,
}

/// Clamp a lever percentage to `0..=max` (non-finite reads as 0).
fn percent(value: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, max)
    } else {
        0.0
    }
}

fn keep_factor(reduction_percent: f64, max: f64) -> f64 {
    1.0 - percent(reduction_percent, max) / 100.0
}

/// Build the scenario input from `original`. Inactive levers leave their
/// fields exactly as in the original.
pub fn apply_levers(original: &LifestyleInput, levers: &ScenarioLevers) -> LifestyleInput {
    let mut modified = original.clone();

    if let Some(renewable) = levers.renewable_percent {
        modified.energy_details.renewable_percent = percent(renewable, ranges::RENEWABLE_MAX);
    }

    if levers.is_active(Lever::ReduceDriving) {
        let keep = keep_factor(levers.reduce_driving_percent, ranges::DRIVING_MAX);
        for (entry, orig) in modified.commute.iter_mut().zip(&original.commute) {
            if orig.mode.is_car_like() {
                entry.miles_per_trip = orig.miles_per_trip * keep;
            }
        }
    }

    if levers.is_active(Lever::ReduceMeat) {
        let keep = keep_factor(levers.reduce_meat_percent, ranges::MEAT_MAX);
        let orig = &original.diet_details;
        let diet = &mut modified.diet_details;
        diet.beef_servings_per_week = orig.beef_servings_per_week * keep;
        diet.pork_servings_per_week = orig.pork_servings_per_week * keep;
        diet.chicken_servings_per_week = orig.chicken_servings_per_week * keep;
        diet.lamb_servings_per_week = orig.lamb_servings_per_week * keep;
    }

    if levers.is_active(Lever::ReduceShopping) {
        let keep = keep_factor(levers.reduce_shopping_percent, ranges::SHOPPING_MAX);
        let orig = &original.shopping;
        modified.shopping.clothing_spend = orig.clothing_spend * keep;
        modified.shopping.electronics_spend = orig.electronics_spend * keep;
        modified.shopping.general_spend = orig.general_spend * keep;
    }

    modified
}

/// Evaluate a scenario with the standard factor table.
pub fn evaluate(
    original_input: &LifestyleInput,
    original_result: &EmissionsResult,
    levers: &ScenarioLevers,
) -> ScenarioOutcome {
    evaluate_with(original_input, original_result, levers, EmissionFactors::standard())
}

/// Apply `levers` to a copy of the original input and recompute.
///
/// `original_result` must come from the same input and factor table; it is
/// the reference for every delta.
pub fn evaluate_with(
    original_input: &LifestyleInput,
    original_result: &EmissionsResult,
    levers: &ScenarioLevers,
    factors: &EmissionFactors,
) -> ScenarioOutcome {
    let original_total = original_result.annual.total;

    let modified_input = apply_levers(original_input, levers);
    let modified_result = compute_with(&modified_input, factors);
    let total_delta = original_total - modified_result.annual.total;

    let mut per_lever = LeverDeltas::default();
    for lever in Lever::all() {
        if levers.is_active(*lever) {
            let alone = apply_levers(original_input, &levers.isolate(*lever));
            let alone_total = compute_with(&alone, factors).annual.total;
            per_lever.set(*lever, original_total - alone_total);
        }
    }

    log::debug!(
        "scenario: {:.1} -> {:.1} kg/yr ({:+.1}%)",
        original_total,
        modified_result.annual.total,
        -percent_of(total_delta, original_total)
    );

    ScenarioOutcome {
        modified_input,
        modified_result,
        total_delta_kg_per_year: total_delta,
        percent_delta: percent_of(total_delta, original_total),
        per_lever_delta_kg_per_year: per_lever,
    }
}

/// `part / whole * 100`, or 0 when `whole` is 0.
fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}
