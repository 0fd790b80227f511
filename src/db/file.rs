use std::time::Duration;

use async_trait::async_trait;
use aws_config::{timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_sdk_s3::{
    config::Credentials, operation::get_object::GetObjectError, primitives::ByteStream, Client,
};
use bytes::Bytes;
use tracing::error;

use super::{BlobStore, StoreError};
use crate::config::R2Config;

/// Images kept in an S3-compatible bucket (Cloudflare R2).
pub struct R2Store {
    client: Client,
    bucket: String,
}

impl R2Store {
    pub async fn new(config: &R2Config) -> Self {
        let mut timeout = TimeoutConfig::builder();

        timeout
            .set_connect_timeout(Some(Duration::from_secs(3)))
            .set_operation_timeout(Some(Duration::from_secs(10)))
            .set_read_timeout(Some(Duration::from_secs(3)));

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "blackbar",
            ))
            .region(Region::new(config.region.clone()))
            .endpoint_url(config.endpoint.clone())
            .timeout_config(timeout.build())
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
            bucket: config.bucket.clone(),
        }
    }
}

fn object_key(key: &str) -> String {
    format!("images/{}", key)
}

#[async_trait]
impl BlobStore for R2Store {
    async fn put(&self, key: &str, data: Bytes) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(object_key(key))
            .content_type("image/jpeg")
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                error!(key, "r2 put_object failed: {:?}", e);
                StoreError::Io(e.to_string())
            })?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(object_key(key))
            .send()
            .await
            .map_err(|e| match e.into_service_error() {
                GetObjectError::NoSuchKey(_) => StoreError::NotFound {
                    key: key.to_string(),
                },
                other => {
                    error!(key, "r2 get_object failed: {:?}", other);
                    StoreError::Io(other.to_string())
                }
            })?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(data.into_bytes())
    }
}
