use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::config::StorageConfig;

pub mod file;
pub mod memory;

pub use file::R2Store;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("image not found: {key}")]
    NotFound { key: String },

    #[error("storage error: {0}")]
    Io(String),
}

/// Key/value store for encoded images.
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    async fn put(&self, key: &str, data: Bytes) -> Result<(), StoreError>;

    async fn get(&self, key: &str) -> Result<Bytes, StoreError>;
}

pub type SharedStore = Arc<dyn BlobStore>;

pub async fn build_store(config: &StorageConfig) -> SharedStore {
    match config {
        StorageConfig::Memory => Arc::new(MemoryStore::default()),
        StorageConfig::R2(r2) => Arc::new(R2Store::new(r2).await),
    }
}
