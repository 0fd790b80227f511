use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use super::{BlobStore, StoreError};

/// Process-local store; contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    images: RwLock<HashMap<String, Bytes>>,
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn put(&self, key: &str, data: Bytes) -> Result<(), StoreError> {
        self.images.write().await.insert(key.to_string(), data);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        self.images
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryStore::default();
        store.put("abcd1234", Bytes::from_static(b"jpeg")).await.unwrap();

        let data = store.get("abcd1234").await.unwrap();
        assert_eq!(data.as_ref(), b"jpeg");
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemoryStore::default();
        store.put("k", Bytes::from_static(b"one")).await.unwrap();
        store.put("k", Bytes::from_static(b"two")).await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_ref(), b"two");
    }

    #[tokio::test]
    async fn test_missing_key() {
        let store = MemoryStore::default();
        match store.get("missing").await {
            Err(StoreError::NotFound { key }) => assert_eq!(key, "missing"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
