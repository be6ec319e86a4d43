//! Pure footprint logic for CarbonWise.
//!
//! This crate contains all calculation logic that is independent of any
//! storage backend or UI. Functions take plain data and return results,
//! making them unit-testable and cheap enough to rerun on every slider
//! movement.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`calculator`] | Lifestyle input → annual/daily breakdown, comparisons |
//! | [`factors`] | Emission factor table (EPA 2024, eGRID 2023), swappable |
//! | [`history`] | Saved snapshots, progress timeline, comparison picks |
//! | [`input`] | Lifestyle input model, clamping and validation |
//! | [`scenario`] | What-if levers re-evaluated against the original input |
//! | [`suggestions`] | Threshold rules producing the top three actions |
//! | [`world`] | Country per-capita table for world comparison |

pub mod calculator;
pub mod factors;
pub mod history;
pub mod input;
pub mod scenario;
pub mod suggestions;
pub mod world;

pub use calculator::{compute, compute_with, EmissionsBreakdown, EmissionsResult};
pub use factors::EmissionFactors;
pub use input::LifestyleInput;
pub use scenario::{evaluate, ScenarioLevers, ScenarioOutcome};
pub use suggestions::{suggest, Suggestion};
