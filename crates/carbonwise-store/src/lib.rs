//! Saved-calculation persistence for CarbonWise.
//!
//! The logic crate never touches storage. Callers hold a
//! [`CalculationStore`] and pass it where snapshots are saved or listed.
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`MemoryStore`] | Tests, headless runs |
//! | [`JsonFileStore`] | One JSON array on disk, rewritten on every change |

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use carbonwise_logic::calculator::EmissionsResult;
use carbonwise_logic::history::SavedCalculation;
use carbonwise_logic::input::LifestyleInput;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File name used when no path is configured.
pub const DEFAULT_STORE_FILE: &str = "carbonwise_calculations.json";

/// Where a file-backed store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_FILE),
        }
    }
}

/// Keeps named calculation snapshots.
///
/// Snapshots are listed in the order they were saved and never modified
/// after creation.
pub trait CalculationStore {
    /// Store a new snapshot and return its id.
    fn save(
        &mut self,
        name: &str,
        input: &LifestyleInput,
        result: &EmissionsResult,
    ) -> Result<String, StoreError>;

    fn list(&self) -> Result<Vec<SavedCalculation>, StoreError>;

    fn get(&self, id: &str) -> Result<Option<SavedCalculation>, StoreError>;

    /// Remove a snapshot. Fails with [`StoreError::NotFound`] for unknown ids.
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;

    /// The input of a saved snapshot, for reloading into the wizard.
    fn load_input(&self, id: &str) -> Result<LifestyleInput, StoreError> {
        self.get(id)?
            .map(|calc| calc.input)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

/// Id for a snapshot created at `now`: epoch milliseconds, bumped until it
/// collides with nothing in `existing`.
pub fn next_id(existing: &[SavedCalculation], now: DateTime<Utc>) -> String {
    let mut millis = now.timestamp_millis();
    loop {
        let id = millis.to_string();
        if !existing.iter().any(|c| c.id == id) {
            return id;
        }
        millis += 1;
    }
}

/// Build the record a store appends on save.
pub(crate) fn new_snapshot(
    existing: &[SavedCalculation],
    name: &str,
    input: &LifestyleInput,
    result: &EmissionsResult,
) -> SavedCalculation {
    let now = Utc::now();
    SavedCalculation {
        id: next_id(existing, now),
        name: name.to_string(),
        timestamp: now,
        input: input.clone(),
        result: result.clone(),
    }
}

/// Errors that can occur while reading or writing snapshots
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    NotFound(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Json(e) => write!(f, "Serialization error: {}", e),
            StoreError::NotFound(id) => write!(f, "No saved calculation with id {}", id),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
            StoreError::NotFound(_) => None,
        }
    }
}
