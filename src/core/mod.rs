pub mod dataset_manager;
pub mod services;

pub use dataset_manager::{DatasetManager, LoadMetadata};
