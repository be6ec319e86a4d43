//! CarbonWise Headless Validation Harness
//!
//! Validates the pure footprint logic against sample household profiles.
//! Runs entirely in-process with an in-memory store.
//!
//! Usage:
//!   cargo run -p carbonwise-simtest
//!   cargo run -p carbonwise-simtest -- --verbose
//!   cargo run -p carbonwise-simtest -- --factors my_factors.json

use carbonwise_logic::calculator::{self, Category, EmissionsResult, DAYS_PER_YEAR};
use carbonwise_logic::factors::EmissionFactors;
use carbonwise_logic::history::{self, ComparisonSelection, MAX_COMPARED};
use carbonwise_logic::input::{self, InputError, LifestyleInput, TransportMode};
use carbonwise_logic::scenario::{self, Lever, ScenarioLevers};
use carbonwise_logic::suggestions::MAX_SUGGESTIONS;
use carbonwise_logic::world;
use carbonwise_store::{CalculationStore, MemoryStore};
use serde::Deserialize;

// ── Sample profiles ─────────────────────────────────────────────────────
const PROFILES_JSON: &str = include_str!("../../../data/sample_profiles.json");

#[derive(Debug, Deserialize)]
struct SampleProfile {
    name: String,
    input: LifestyleInput,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

const TOLERANCE: f64 = 1e-6;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    println!("=== CarbonWise Validation Harness ===\n");

    let factors = match args.iter().position(|a| a == "--factors") {
        Some(i) => match args.get(i + 1) {
            Some(path) => match load_factors(path) {
                Ok(f) => {
                    println!("Using emission factors from {}\n", path);
                    f
                }
                Err(e) => {
                    eprintln!("cannot load factors from {}: {}", path, e);
                    std::process::exit(2);
                }
            },
            None => {
                eprintln!("--factors needs a path");
                std::process::exit(2);
            }
        },
        None => EmissionFactors::default(),
    };

    let profiles: Vec<SampleProfile> = match serde_json::from_str(PROFILES_JSON) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("sample profiles: JSON parse error: {}", e);
            std::process::exit(1);
        }
    };

    let mut results = Vec::new();

    // 1. Factor table sanity
    results.extend(validate_factor_table(&factors, verbose));

    // 2. Calculator invariants over every profile
    results.extend(validate_calculator(&factors, &profiles, verbose));

    // 3. Input sanitizing and validation
    results.extend(validate_input_layer(&factors, &profiles, verbose));

    // 4. Suggestion ranking
    results.extend(validate_suggestions(&factors, &profiles, verbose));

    // 5. What-if scenarios
    results.extend(validate_scenarios(&factors, &profiles, verbose));

    // 6. Saved calculations, timeline and world comparison
    results.extend(validate_history(&factors, &profiles, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_factors(path: &str) -> Result<EmissionFactors, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(EmissionFactors::from_json(&text)?)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * b.abs().max(1.0)
}

// ── 1. Factor Table ─────────────────────────────────────────────────────

fn validate_factor_table(factors: &EmissionFactors, verbose: bool) -> Vec<TestResult> {
    println!("--- Emission Factor Table ---");
    let mut results = Vec::new();

    let bad_regions: Vec<_> = factors
        .electricity_by_region
        .iter()
        .filter(|(_, v)| !v.is_finite() || **v < 0.0)
        .map(|(k, _)| k.as_str())
        .collect();
    results.push(TestResult {
        name: "factors_region_values".into(),
        passed: bad_regions.is_empty() && !factors.electricity_by_region.is_empty(),
        detail: if bad_regions.is_empty() {
            format!("{} regions, all non-negative", factors.electricity_by_region.len())
        } else {
            format!("invalid region factors: {}", bad_regions.join(", "))
        },
    });

    let unknown = factors.electricity_factor("ZZ");
    results.push(TestResult {
        name: "factors_unknown_region_national".into(),
        passed: unknown == factors.energy.electricity_national_avg,
        detail: format!("ZZ → {} kg/kWh", unknown),
    });

    let bad_modes: Vec<_> = TransportMode::all()
        .iter()
        .filter(|m| {
            let f = factors.transport_factor(**m);
            !f.is_finite() || f < 0.0
        })
        .map(|m| m.key())
        .collect();
    results.push(TestResult {
        name: "factors_transport_non_negative".into(),
        passed: bad_modes.is_empty(),
        detail: if bad_modes.is_empty() {
            format!("{} modes checked", TransportMode::all().len())
        } else {
            format!("negative or non-finite: {}", bad_modes.join(", "))
        },
    });

    let multipliers: Vec<f64> = (1..=8).map(|n| factors.household_multiplier(n)).collect();
    let in_range = multipliers.iter().all(|m| *m > 0.0 && *m <= 1.0);
    results.push(TestResult {
        name: "factors_household_multipliers".into(),
        passed: in_range,
        detail: format!("sizes 1..=8 → {:?}", multipliers),
    });

    let b = &factors.baselines;
    results.push(TestResult {
        name: "factors_baselines_positive".into(),
        passed: b.national_average > 0.0 && b.global_average > 0.0 && b.target > 0.0,
        detail: format!(
            "national={} global={} target={}",
            b.national_average, b.global_average, b.target
        ),
    });

    if verbose {
        let a = &factors.aviation;
        println!(
            "  Flights: short≤{}mi {} | medium≤{}mi {} | long {}",
            a.short_max_miles, a.short_haul, a.medium_max_miles, a.medium_haul, a.long_haul
        );
    }

    results
}

// ── 2. Calculator ───────────────────────────────────────────────────────

fn validate_calculator(
    factors: &EmissionFactors,
    profiles: &[SampleProfile],
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Footprint Calculator ---");
    let mut results = Vec::new();

    for p in profiles {
        let r = calculator::compute_with(&p.input, factors);
        let a = &r.annual;
        let sum: f64 = a.categories().iter().map(|(_, v)| v).sum();
        results.push(TestResult {
            name: format!("calc_{}_additive", p.name),
            passed: close(a.total, sum),
            detail: format!("total={:.3} sum={:.3}", a.total, sum),
        });

        let daily_ok = Category::all()
            .iter()
            .all(|c| r.daily.get(*c) == a.get(*c) / DAYS_PER_YEAR)
            && r.daily.total == a.total / DAYS_PER_YEAR;
        results.push(TestResult {
            name: format!("calc_{}_daily", p.name),
            passed: daily_ok,
            detail: format!("daily total {:.3} kg", r.daily.total),
        });

        let negative: Vec<_> = a
            .categories()
            .into_iter()
            .filter(|(_, v)| *v < 0.0 || !v.is_finite())
            .map(|(c, _)| c.label())
            .collect();
        results.push(TestResult {
            name: format!("calc_{}_non_negative", p.name),
            passed: negative.is_empty(),
            detail: if negative.is_empty() {
                "all categories ≥ 0".into()
            } else {
                format!("negative: {}", negative.join(", "))
            },
        });

        let national = calculator::percent_change(a.total, factors.baselines.national_average);
        results.push(TestResult {
            name: format!("calc_{}_comparisons", p.name),
            passed: r.comparisons.vs_national_average == national,
            detail: format!(
                "{:+.1}% national, {:+.1}% global, {:+.1}% target",
                r.comparisons.vs_national_average,
                r.comparisons.vs_global_average,
                r.comparisons.vs_target
            ),
        });

        if verbose {
            print_breakdown(&p.name, &r);
        }
    }

    // Second household member never raises the per-person footprint
    let mut monotone_failures = Vec::new();
    for p in profiles {
        let mut single = p.input.clone();
        single.household_size = 1;
        let mut pair = p.input.clone();
        pair.household_size = 2;
        let one = calculator::compute_with(&single, factors).annual.total;
        let two = calculator::compute_with(&pair, factors).annual.total;
        if two > one {
            monotone_failures.push(p.name.as_str());
        }
    }
    results.push(TestResult {
        name: "calc_household_monotone".into(),
        passed: monotone_failures.is_empty(),
        detail: if monotone_failures.is_empty() {
            format!("{} profiles checked", profiles.len())
        } else {
            format!("household 2 > 1 for {}", monotone_failures.join(", "))
        },
    });

    // Waste floor across the diversion grid
    let mut min_waste = f64::MAX;
    let mut input = LifestyleInput::default();
    input.waste.total_kg = 50.0;
    for recycle in (0..=100).step_by(5) {
        for compost in (0..=100).step_by(5) {
            input.waste.recycle_percent = recycle as f64;
            input.waste.compost_percent = compost as f64;
            let w = calculator::compute_with(&input, factors).annual.waste;
            min_waste = min_waste.min(w);
        }
    }
    results.push(TestResult {
        name: "calc_waste_floor".into(),
        passed: min_waste >= 0.0,
        detail: format!("lowest waste over grid {:.3}", min_waste),
    });

    // Worked example, only meaningful against the built-in table
    if factors == EmissionFactors::standard() {
        if let Some(p) = profiles.iter().find(|p| p.name == "suburban_commuter") {
            let a = calculator::compute_with(&p.input, factors).annual;
            results.push(TestResult {
                name: "calc_worked_example".into(),
                passed: close(a.transport, 2100.8) && a.diet == 2500.0,
                detail: format!("transport={:.2} diet={:.0}", a.transport, a.diet),
            });
        }
    }

    results
}

fn print_breakdown(name: &str, r: &EmissionsResult) {
    println!("  {}: {:.2} t/yr", name, r.annual.total / 1000.0);
    for (c, share) in r.annual.category_shares() {
        println!(
            "    {:14} {:>9.1} kg ({:>4.1}%)",
            c.label(),
            r.annual.get(c),
            share * 100.0
        );
    }
}

// ── 3. Input Layer ──────────────────────────────────────────────────────

fn validate_input_layer(
    factors: &EmissionFactors,
    profiles: &[SampleProfile],
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Input Layer ---");
    let mut results = Vec::new();

    for p in profiles {
        let errors = input::validate_input_with(&p.input, factors);
        if verbose && !errors.is_empty() {
            for e in &errors {
                println!("  {}: {}", p.name, e);
            }
        }
    }

    if let Some(p) = profiles.iter().find(|p| p.name == "legacy_keys") {
        let errors = input::validate_input_with(&p.input, factors);
        let subway = p.input.commute.first().map(|c| c.mode);
        results.push(TestResult {
            name: "input_legacy_subway_key".into(),
            passed: subway == Some(TransportMode::Subway),
            detail: format!("train_subway → {:?}", subway),
        });
        results.push(TestResult {
            name: "input_unknown_mode_reported".into(),
            passed: errors.contains(&InputError::UnknownTransportMode(1)),
            detail: format!("{} problems reported", errors.len()),
        });
    }

    // Garbage in every numeric field, sanitized
    let mut garbage = LifestyleInput::default();
    garbage.household_size = 0;
    garbage.commute[0].miles_per_trip = f64::NAN;
    garbage.commute[0].days_per_week = 12;
    garbage.energy.electricity_kwh = -5.0;
    garbage.energy.natural_gas_therms = f64::INFINITY;
    garbage.shopping.general_spend = 1e12;
    garbage.waste.recycle_percent = 80.0;
    garbage.waste.compost_percent = 80.0;
    let before = input::validate_input_with(&garbage, factors).len();
    let clean = input::sanitize(&garbage);
    let after = input::validate_input_with(&clean, factors);
    let total = calculator::compute_with(&clean, factors).annual.total;
    results.push(TestResult {
        name: "input_sanitize_garbage".into(),
        passed: before > 0 && after.is_empty() && total.is_finite(),
        detail: format!(
            "{} problems before, {} after, total {:.1}",
            before,
            after.len(),
            total
        ),
    });

    results
}

// ── 4. Suggestions ──────────────────────────────────────────────────────

fn validate_suggestions(
    factors: &EmissionFactors,
    profiles: &[SampleProfile],
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Suggestions ---");
    let mut results = Vec::new();

    for p in profiles {
        let s = calculator::compute_with(&p.input, factors).suggestions;
        let sorted = s
            .windows(2)
            .all(|w| w[0].savings_kg_per_year >= w[1].savings_kg_per_year);
        results.push(TestResult {
            name: format!("suggest_{}_ranked", p.name),
            passed: s.len() <= MAX_SUGGESTIONS && sorted,
            detail: format!(
                "{} suggestions: {}",
                s.len(),
                s.iter()
                    .map(|x| format!("{}={:.0}", x.category.label(), x.savings_kg_per_year))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        });
        if verbose {
            for x in &s {
                println!("  {}: [{:?}] {}", p.name, x.difficulty, x.action);
            }
        }
    }

    results
}

// ── 5. Scenarios ────────────────────────────────────────────────────────

fn validate_scenarios(
    factors: &EmissionFactors,
    profiles: &[SampleProfile],
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- What-If Scenarios ---");
    let mut results = Vec::new();

    let full = ScenarioLevers {
        renewable_percent: Some(80.0),
        reduce_driving_percent: 30.0,
        reduce_meat_percent: 50.0,
        reduce_shopping_percent: 25.0,
    };

    for p in profiles {
        let original = calculator::compute_with(&p.input, factors);
        let snapshot = p.input.clone();

        let idle = scenario::evaluate_with(&p.input, &original, &ScenarioLevers::default(), factors);
        results.push(TestResult {
            name: format!("scenario_{}_idle", p.name),
            passed: idle.modified_result == original && idle.total_delta_kg_per_year == 0.0,
            detail: "all levers at rest reproduce the original".into(),
        });

        let outcome = scenario::evaluate_with(&p.input, &original, &full, factors);
        let expected = original.annual.total - outcome.modified_result.annual.total;
        results.push(TestResult {
            name: format!("scenario_{}_delta", p.name),
            passed: p.input == snapshot && close(outcome.total_delta_kg_per_year, expected),
            detail: format!(
                "{:.1} kg/yr saved ({:.1}%)",
                outcome.total_delta_kg_per_year, outcome.percent_delta
            ),
        });

        if verbose {
            for lever in Lever::all() {
                println!(
                    "  {}: {:28} {:>8.1} kg",
                    p.name,
                    lever.title(),
                    outcome.per_lever_delta_kg_per_year.get(*lever)
                );
            }
        }
    }

    // Shopping lever saturates at its maximum
    if let Some(p) = profiles.first() {
        let original = calculator::compute_with(&p.input, factors);
        let at = |pct: f64| {
            let levers = ScenarioLevers {
                reduce_shopping_percent: pct,
                ..ScenarioLevers::default()
            };
            scenario::evaluate_with(&p.input, &original, &levers, factors).total_delta_kg_per_year
        };
        let capped = at(scenario::ranges::SHOPPING_MAX);
        let over = at(100.0);
        results.push(TestResult {
            name: "scenario_shopping_cap".into(),
            passed: capped == over,
            detail: format!("50% → {:.1}, 100% → {:.1}", capped, over),
        });
    }

    results
}

// ── 6. History & World ──────────────────────────────────────────────────

fn validate_history(
    factors: &EmissionFactors,
    profiles: &[SampleProfile],
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Saved Calculations ---");
    let mut results = Vec::new();

    let mut store = MemoryStore::new();
    let mut ids = Vec::new();
    for p in profiles {
        let result = calculator::compute_with(&p.input, factors);
        match store.save(&p.name, &p.input, &result) {
            Ok(id) => ids.push(id),
            Err(e) => results.push(TestResult {
                name: format!("store_save_{}", p.name),
                passed: false,
                detail: e.to_string(),
            }),
        }
    }

    let saved = store.list().unwrap_or_default();
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    results.push(TestResult {
        name: "store_unique_ids".into(),
        passed: saved.len() == profiles.len() && unique.len() == ids.len(),
        detail: format!("{} saved, {} distinct ids", saved.len(), unique.len()),
    });

    let reloaded = ids
        .first()
        .and_then(|id| store.load_input(id).ok())
        .zip(profiles.first())
        .map(|(input, p)| input == p.input)
        .unwrap_or(false);
    results.push(TestResult {
        name: "store_reload_input".into(),
        passed: reloaded,
        detail: "first snapshot reloads the same input".into(),
    });

    let timeline = history::timeline(&saved);
    let ordered = timeline
        .points
        .windows(2)
        .all(|w| w[0].timestamp <= w[1].timestamp);
    results.push(TestResult {
        name: "history_timeline".into(),
        passed: ordered && timeline.points.len() == saved.len(),
        detail: match timeline.latest_change {
            Some(c) => format!(
                "{} points, latest change {:+.2} t ({:+.1}%)",
                timeline.points.len(),
                c.change_tonnes,
                c.percent_change
            ),
            None => format!("{} points", timeline.points.len()),
        },
    });

    let mut selection = ComparisonSelection::default();
    for id in &ids {
        selection.toggle(id);
    }
    results.push(TestResult {
        name: "history_compare_cap".into(),
        passed: selection.ids().len() == MAX_COMPARED.min(ids.len()),
        detail: format!("{} of {} selected", selection.ids().len(), ids.len()),
    });

    if let Some(id) = ids.first() {
        let deleted = store.delete(id).is_ok() && store.get(id).map(|c| c.is_none()).unwrap_or(false);
        results.push(TestResult {
            name: "store_delete".into(),
            passed: deleted && store.len() + 1 == profiles.len(),
            detail: format!("{} left after delete", store.len()),
        });
    }

    let countries = saved
        .first()
        .map(|c| world::compare_to_countries(c.result.annual.total))
        .unwrap_or_default();
    results.push(TestResult {
        name: "world_comparison".into(),
        passed: countries.len() == world::countries().len(),
        detail: format!("{} countries compared", countries.len()),
    });
    if verbose {
        for c in &countries {
            println!(
                "  vs {:15} {:>5.1} t  {:+7.1}%  {:?}",
                c.country.name, c.country.per_capita_tonnes, c.percent_difference, c.band
            );
        }
    }

    results
}
