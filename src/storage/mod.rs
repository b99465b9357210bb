pub mod json_backend;

use std::path::Path;

use crate::{dataset::Dataset, errors::DatasetError};

pub type Result<T> = std::result::Result<T, DatasetError>;

/// Abstraction over persistence backends capable of storing datasets and
/// snapshots. The engine never sees this; services and the manager do.
pub trait StorageBackend: Send + Sync {
    fn save(&self, dataset: &Dataset, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Dataset>;
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;
    fn backup(&self, dataset: &Dataset, name: &str, note: Option<&str>) -> Result<()>;
    fn restore(&self, name: &str, backup_name: &str) -> Result<Dataset>;
    fn last_dataset(&self) -> Result<Option<String>>;
    fn record_last_dataset(&self, name: Option<&str>) -> Result<()>;

    /// Optional helpers for ad-hoc file operations. Default implementations
    /// forward to the plain JSON read/write path.
    fn save_to_path(&self, dataset: &Dataset, path: &Path) -> Result<()> {
        json_backend::save_dataset_to_path(dataset, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Dataset> {
        json_backend::load_dataset_from_path(path)
    }
}

pub use json_backend::JsonStorage;
