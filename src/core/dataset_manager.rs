use chrono::NaiveDate;

use crate::dataset::{integrity, Dataset, CURRENT_SCHEMA_VERSION};
use crate::engine;
use crate::errors::DatasetError;
use crate::storage::StorageBackend;

/// Metadata describing the outcome of opening a dataset.
#[derive(Debug, Clone)]
pub struct LoadMetadata {
    pub name: String,
    pub warnings: Vec<String>,
    pub schema_version: u8,
}

/// Facade that coordinates the current dataset, persistence, and the
/// recalculation that keeps derived fields fresh across loads and saves.
pub struct DatasetManager {
    pub current: Option<Dataset>,
    current_name: Option<String>,
    storage: Box<dyn StorageBackend>,
}

impl DatasetManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            current: None,
            current_name: None,
            storage,
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    /// Starts a fresh seeded dataset as the current one, unsaved.
    pub fn create(&mut self, name: &str) -> &mut Dataset {
        self.current = Some(Dataset::seeded(name));
        self.current_name = Some(name.to_string());
        self.current.as_mut().unwrap()
    }

    /// Loads a named dataset and runs a recalculation pass so no stale
    /// derived field survives the trip through storage.
    pub fn open(&mut self, name: &str, today: NaiveDate) -> Result<LoadMetadata, DatasetError> {
        let mut dataset = self.storage.load(name)?;
        ensure_schema_support(dataset.schema_version)?;

        let report = engine::recalculate(&mut dataset, today);
        let mut warnings = integrity::dataset_warnings(&dataset);
        warnings.extend(
            report
                .issues
                .iter()
                .map(|issue| format!("transaction {}: {}", issue.transaction, issue.error)),
        );

        let schema_version = dataset.schema_version;
        self.current = Some(dataset);
        self.current_name = Some(name.to_string());
        self.storage.record_last_dataset(Some(name))?;
        tracing::info!(name, warnings = warnings.len(), "dataset opened");
        Ok(LoadMetadata {
            name: name.to_string(),
            warnings,
            schema_version,
        })
    }

    pub fn save(&mut self) -> Result<(), DatasetError> {
        let name = self
            .current_name
            .clone()
            .ok_or_else(|| DatasetError::Storage("current dataset is unnamed".into()))?;
        self.save_as(&name)
    }

    pub fn save_as(&mut self, name: &str) -> Result<(), DatasetError> {
        let dataset = self
            .current
            .as_ref()
            .ok_or_else(|| DatasetError::Storage("no dataset loaded".into()))?;
        self.storage.save(dataset, name)?;
        self.current_name = Some(name.to_string());
        self.storage.record_last_dataset(Some(name))?;
        Ok(())
    }

    /// Name of the most recently opened or saved dataset, if any.
    pub fn last_opened(&self) -> Result<Option<String>, DatasetError> {
        self.storage.last_dataset()
    }

    pub fn backup(&self, note: Option<&str>) -> Result<(), DatasetError> {
        let name = self
            .current_name
            .as_deref()
            .ok_or_else(|| DatasetError::Storage("current dataset is unnamed".into()))?;
        let dataset = self
            .current
            .as_ref()
            .ok_or_else(|| DatasetError::Storage("no dataset loaded".into()))?;
        self.storage.backup(dataset, name, note)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.current_name = None;
    }
}

fn ensure_schema_support(schema_version: u8) -> Result<(), DatasetError> {
    if schema_version > CURRENT_SCHEMA_VERSION {
        return Err(DatasetError::Storage(format!(
            "dataset schema v{} is newer than supported v{}",
            schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonStorage;
    use std::fs;
    use tempfile::tempdir;

    fn manager_in(temp: &tempfile::TempDir) -> DatasetManager {
        let storage = JsonStorage::new(Some(temp.path().to_path_buf()), Some(3)).unwrap();
        DatasetManager::new(Box::new(storage))
    }

    #[test]
    fn save_and_open_named_roundtrip() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(&temp);

        manager.create("demo");
        manager.save().expect("save dataset");
        manager.backup(Some("fresh")).expect("backup dataset");
        assert!(!manager.storage().list_backups("demo").unwrap().is_empty());

        manager.clear();
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let metadata = manager.open("demo", today).expect("open dataset");
        assert_eq!(metadata.name, "demo");
        assert!(metadata.warnings.is_empty());
        assert!(manager.current.is_some());
        assert_eq!(manager.last_opened().unwrap().as_deref(), Some("demo"));
    }

    #[test]
    fn rejects_future_schema_versions() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(&temp);

        let mut dataset = Dataset::new("Future");
        dataset.schema_version = CURRENT_SCHEMA_VERSION + 5;
        let path = temp
            .path()
            .join("datasets")
            .join("future.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, serde_json::to_string(&dataset).unwrap()).unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let err = manager
            .open("future", today)
            .expect_err("future schema should fail");
        match err {
            DatasetError::Storage(message) => {
                assert!(message.contains("newer"), "unexpected error: {message}");
            }
            other => panic!("expected storage error, got {other:?}"),
        }
    }
}
