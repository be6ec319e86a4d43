use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use carbonwise_logic::calculator::EmissionsResult;
use carbonwise_logic::history::SavedCalculation;
use carbonwise_logic::input::LifestyleInput;

use crate::{new_snapshot, CalculationStore, StoreConfig, StoreError};

/// Snapshots kept as a single JSON array in one file.
///
/// Every call reads the file; every change rewrites it through a sibling
/// temp file. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            path: config.path.clone(),
        }
    }

    fn load_all(&self) -> Result<Vec<SavedCalculation>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                log::warn!("cannot read {}: {}", self.path.display(), e);
                return Err(e.into());
            }
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|e| {
            log::warn!("corrupt calculation store {}: {}", self.path.display(), e);
            StoreError::from(e)
        })
    }

    fn write_all(&self, records: &[SavedCalculation]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CalculationStore for JsonFileStore {
    fn save(
        &mut self,
        name: &str,
        input: &LifestyleInput,
        result: &EmissionsResult,
    ) -> Result<String, StoreError> {
        let mut records = self.load_all()?;
        let record = new_snapshot(&records, name, input, result);
        let id = record.id.clone();
        records.push(record);
        self.write_all(&records)?;
        log::info!(
            "saved calculation '{}' ({}) to {}",
            name,
            id,
            self.path.display()
        );
        Ok(id)
    }

    fn list(&self) -> Result<Vec<SavedCalculation>, StoreError> {
        self.load_all()
    }

    fn get(&self, id: &str) -> Result<Option<SavedCalculation>, StoreError> {
        Ok(self.load_all()?.into_iter().find(|c| c.id == id))
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let mut records = self.load_all()?;
        let before = records.len();
        records.retain(|c| c.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.write_all(&records)?;
        log::info!("deleted calculation {} from {}", id, self.path.display());
        Ok(())
    }
}
