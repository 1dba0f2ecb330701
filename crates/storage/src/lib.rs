// Scorecard Storage Layer
//
// Abstract scan/todo storage interface with pluggable backends

pub mod trait_;
pub mod memory;
pub mod json;

use scorecard_core::config::{StorageConfig, StorageType};
use std::sync::Arc;

pub use json::JsonStorage;
pub use memory::{MemoryStorage, create_memory_storage};
pub use trait_::*;

/// Build the backend selected by configuration
pub async fn create_storage(config: &StorageConfig) -> Result<SharedStorage> {
    match config.storage_type {
        StorageType::Memory => Ok(create_memory_storage()),
        StorageType::Json => {
            let storage = JsonStorage::open(config.db_path.clone()).await?;
            Ok(Arc::new(storage))
        }
    }
}
