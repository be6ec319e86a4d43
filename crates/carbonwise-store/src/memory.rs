use carbonwise_logic::calculator::EmissionsResult;
use carbonwise_logic::history::SavedCalculation;
use carbonwise_logic::input::LifestyleInput;

use crate::{new_snapshot, CalculationStore, StoreError};

/// Snapshots held in a `Vec`; gone when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<SavedCalculation>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CalculationStore for MemoryStore {
    fn save(
        &mut self,
        name: &str,
        input: &LifestyleInput,
        result: &EmissionsResult,
    ) -> Result<String, StoreError> {
        let record = new_snapshot(&self.records, name, input, result);
        let id = record.id.clone();
        self.records.push(record);
        Ok(id)
    }

    fn list(&self) -> Result<Vec<SavedCalculation>, StoreError> {
        Ok(self.records.clone())
    }

    fn get(&self, id: &str) -> Result<Option<SavedCalculation>, StoreError> {
        Ok(self.records.iter().find(|c| c.id == id).cloned())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.records.len();
        self.records.retain(|c| c.id != id);
        if self.records.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbonwise_logic::calculator::compute;

    #[test]
    fn save_list_get_delete() {
        let mut store = MemoryStore::new();
        let input = LifestyleInput::default();
        let result = compute(&input);

        let a = store.save("baseline", &input, &result).unwrap();
        let b = store.save("after bike", &input, &result).unwrap();
        assert_ne!(a, b, "rapid saves must still get distinct ids");

        let names: Vec<_> = store.list().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["baseline", "after bike"]);

        let got = store.get(&a).unwrap().unwrap();
        assert_eq!(got.result, result);
        assert_eq!(store.load_input(&b).unwrap(), input);

        store.delete(&a).unwrap();
        assert!(store.get(&a).unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unknown_ids() {
        let mut store = MemoryStore::new();
        assert!(store.get("nope").unwrap().is_none());
        assert!(matches!(store.delete("nope"), Err(StoreError::NotFound(_))));
        assert!(matches!(store.load_input("nope"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn saved_snapshot_is_a_copy() {
        let mut store = MemoryStore::new();
        let mut input = LifestyleInput::default();
        let result = compute(&input);
        let id = store.save("copy", &input, &result).unwrap();

        input.household_size = 4;
        assert_eq!(store.get(&id).unwrap().unwrap().input.household_size, 1);
    }
}
