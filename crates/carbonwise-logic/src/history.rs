//! Saved calculations and progress over time.
//!
//! A [`SavedCalculation`] pairs an input with its result under a name. It is
//! never edited after creation, only deleted. The timeline and comparison
//! helpers here work on any slice of snapshots, wherever they were loaded
//! from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculator::EmissionsResult;
use crate::input::LifestyleInput;

/// Most snapshots that can be compared side by side.
pub const MAX_COMPARED: usize = 3;

const KG_PER_TONNE: f64 = 1000.0;

/// A named input/result snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCalculation {
    pub id: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub input: LifestyleInput,
    pub result: EmissionsResult,
}

/// One snapshot on the timeline, in tonnes CO2e per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub id: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub total_tonnes: f64,
    pub transport_tonnes: f64,
    pub energy_tonnes: f64,
    pub diet_tonnes: f64,
}

/// Change between the two most recent snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressChange {
    /// Latest minus previous, tonnes; negative is an improvement.
    pub change_tonnes: f64,
    /// Relative to the previous total; 0 if that was 0.
    pub percent_change: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Oldest first.
    pub points: Vec<TimelinePoint>,
    /// `None` with fewer than two snapshots.
    pub latest_change: Option<ProgressChange>,
}

/// Build the timeline of saved snapshots, oldest first.
pub fn timeline(saved: &[SavedCalculation]) -> Timeline {
    let mut points: Vec<TimelinePoint> = saved
        .iter()
        .map(|calc| {
            let a = &calc.result.annual;
            TimelinePoint {
                id: calc.id.clone(),
                name: calc.name.clone(),
                timestamp: calc.timestamp,
                total_tonnes: a.total / KG_PER_TONNE,
                transport_tonnes: a.transport / KG_PER_TONNE,
                energy_tonnes: a.energy / KG_PER_TONNE,
                diet_tonnes: a.diet / KG_PER_TONNE,
            }
        })
        .collect();
    points.sort_by_key(|p| p.timestamp);

    let latest_change = match points.as_slice() {
        [.., previous, latest] => {
            let change = latest.total_tonnes - previous.total_tonnes;
            let percent_change = if previous.total_tonnes > 0.0 {
                change / previous.total_tonnes * 100.0
            } else {
                0.0
            };
            Some(ProgressChange {
                change_tonnes: change,
                percent_change,
            })
        }
        _ => None,
    };

    Timeline {
        points,
        latest_change,
    }
}

/// Ids picked for side-by-side comparison, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSelection {
    selected: Vec<String>,
}

impl ComparisonSelection {
    pub fn ids(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Select or deselect `id`. Selecting beyond [`MAX_COMPARED`] is ignored.
    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
            false
        } else if self.selected.len() < MAX_COMPARED {
            self.selected.push(id.to_string());
            true
        } else {
            false
        }
    }

    /// Drop `id`, e.g. after the snapshot was deleted.
    pub fn remove(&mut self, id: &str) {
        self.selected.retain(|s| s != id);
    }

    /// Selected snapshots, in the order they appear in `saved`.
    pub fn resolve<'a>(&self, saved: &'a [SavedCalculation]) -> Vec<&'a SavedCalculation> {
        saved.iter().filter(|c| self.is_selected(&c.id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute;
    use chrono::TimeZone;

    fn snapshot(id: &str, day: u32, kwh: f64) -> SavedCalculation {
        let mut input = LifestyleInput::default();
        input.energy.electricity_kwh = kwh;
        let result = compute(&input);
        SavedCalculation {
            id: id.to_string(),
            name: format!("calc {id}"),
            timestamp: Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap(),
            input,
            result,
        }
    }

    #[test]
    fn timeline_needs_two_points() {
        assert!(timeline(&[]).latest_change.is_none());
        assert!(timeline(&[snapshot("a", 1, 500.0)]).latest_change.is_none());
    }

    #[test]
    fn timeline_sorted_oldest_first() {
        let saved = vec![
            snapshot("c", 20, 300.0),
            snapshot("a", 1, 900.0),
            snapshot("b", 10, 600.0),
        ];
        let t = timeline(&saved);
        let ids: Vec<_> = t.points.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);

        let change = t.latest_change.unwrap();
        assert!(change.change_tonnes < 0.0, "less electricity should show progress");
        let expected = (t.points[2].total_tonnes - t.points[1].total_tonnes)
            / t.points[1].total_tonnes
            * 100.0;
        assert!((change.percent_change - expected).abs() < 1e-9);
    }

    #[test]
    fn timeline_in_tonnes() {
        let s = snapshot("a", 1, 0.0);
        let t = timeline(std::slice::from_ref(&s));
        assert!((t.points[0].diet_tonnes - 2.5).abs() < 1e-12);
        assert!((t.points[0].total_tonnes - s.result.annual.total / 1000.0).abs() < 1e-12);
    }

    #[test]
    fn zero_previous_total_gives_zero_percent() {
        let mut first = snapshot("a", 1, 0.0);
        first.result.annual = Default::default();
        let second = snapshot("b", 2, 100.0);
        let change = timeline(&[first, second]).latest_change.unwrap();
        assert_eq!(change.percent_change, 0.0);
        assert!(change.change_tonnes > 0.0);
    }

    #[test]
    fn comparison_caps_at_three() {
        let mut sel = ComparisonSelection::default();
        assert!(sel.toggle("a"));
        assert!(sel.toggle("b"));
        assert!(sel.toggle("c"));
        assert!(!sel.toggle("d"));
        assert_eq!(sel.ids(), ["a", "b", "c"]);

        assert!(!sel.toggle("b"));
        assert!(sel.toggle("d"));
        assert_eq!(sel.ids(), ["a", "c", "d"]);
    }

    #[test]
    fn comparison_resolves_and_forgets_deleted() {
        let saved = vec![snapshot("a", 1, 100.0), snapshot("b", 2, 200.0)];
        let mut sel = ComparisonSelection::default();
        sel.toggle("b");
        sel.toggle("zzz");
        let picked = sel.resolve(&saved);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].id, "b");

        sel.remove("b");
        assert!(!sel.is_selected("b"));
        assert!(sel.resolve(&saved).is_empty());
    }

    #[test]
    fn snapshot_survives_json() {
        let s = snapshot("a", 5, 750.0);
        let json = serde_json::to_string(&s).unwrap();
        let back: SavedCalculation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
