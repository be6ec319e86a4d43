//! Reduction suggestions ranked by estimated annual savings.
//!
//! Each rule looks at one category of the household-adjusted breakdown (or
//! the diet profile) and, when its threshold is crossed, proposes a single
//! action. Rules never look at each other. Savings are a share of the
//! category total, capped per rule; the diet rule uses a fixed estimate.

use serde::{Deserialize, Serialize};

use crate::calculator::{Category, EmissionsBreakdown};
use crate::input::LifestyleInput;

/// Maximum suggestions returned.
pub const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: Category,
    pub action: String,
    pub savings_kg_per_year: f64,
    pub difficulty: Difficulty,
}

/// Rule thresholds (kg CO2e per year) and savings parameters.
mod rules {
    pub const TRANSPORT_THRESHOLD: f64 = 2000.0;
    pub const TRANSPORT_SHARE: f64 = 0.4;
    pub const TRANSPORT_CAP: f64 = 1500.0;

    pub const FLIGHTS_THRESHOLD: f64 = 1000.0;
    pub const FLIGHTS_SHARE: f64 = 0.3;
    pub const FLIGHTS_CAP: f64 = 2000.0;

    /// One plant-based day per week.
    pub const MEATLESS_DAY_SAVINGS: f64 = 400.0;

    pub const ENERGY_THRESHOLD: f64 = 3000.0;
    pub const ENERGY_SHARE: f64 = 0.5;
    pub const ENERGY_CAP: f64 = 2500.0;
}

/// Every suggestion whose rule fires, unsorted.
pub fn candidate_suggestions(input: &LifestyleInput, annual: &EmissionsBreakdown) -> Vec<Suggestion> {
    let mut candidates = Vec::new();

    if annual.transport > rules::TRANSPORT_THRESHOLD {
        candidates.push(Suggestion {
            category: Category::Transport,
            action: "Replace 2 car commute days with public transit or biking".to_string(),
            savings_kg_per_year: (annual.transport * rules::TRANSPORT_SHARE)
                .min(rules::TRANSPORT_CAP),
            difficulty: Difficulty::Medium,
        });
    }

    if annual.flights > rules::FLIGHTS_THRESHOLD {
        candidates.push(Suggestion {
            category: Category::Flights,
            action: "Reduce one long-distance flight per year".to_string(),
            savings_kg_per_year: (annual.flights * rules::FLIGHTS_SHARE).min(rules::FLIGHTS_CAP),
            difficulty: Difficulty::Hard,
        });
    }

    if input.diet_profile.is_meat_heavy() {
        candidates.push(Suggestion {
            category: Category::Diet,
            action: "Try \"Meatless Monday\" - go plant-based one day per week".to_string(),
            savings_kg_per_year: rules::MEATLESS_DAY_SAVINGS,
            difficulty: Difficulty::Easy,
        });
    }

    if annual.energy > rules::ENERGY_THRESHOLD {
        candidates.push(Suggestion {
            category: Category::Energy,
            action: "Switch to renewable energy plan or improve home insulation".to_string(),
            savings_kg_per_year: (annual.energy * rules::ENERGY_SHARE).min(rules::ENERGY_CAP),
            difficulty: Difficulty::Medium,
        });
    }

    candidates
}

/// Top suggestions, highest savings first, at most [`MAX_SUGGESTIONS`].
pub fn suggest(input: &LifestyleInput, annual: &EmissionsBreakdown) -> Vec<Suggestion> {
    let mut suggestions = candidate_suggestions(input, annual);
    // Stable: ties keep rule order.
    suggestions.sort_by(|a, b| b.savings_kg_per_year.total_cmp(&a.savings_kg_per_year));
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
