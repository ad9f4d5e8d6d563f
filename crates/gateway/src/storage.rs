//! Blob storage contract and its HTTP implementation.

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

use crate::error::GatewayError;

/// Blob storage: upload bytes under a key, resolve public URLs.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Uploads one object and returns its stored path within the bucket.
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, GatewayError>;

    /// Public URL for a stored path. Pure string assembly.
    fn public_url(&self, path: &str) -> String;
}

/// Builds an object key namespaced by group, upload instant, and a random
/// suffix so parallel uploads cannot collide.
pub fn object_key(group_id: Uuid, timestamp_millis: i64, index: usize, filename: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen();
    match extension(filename) {
        Some(ext) => format!("{group_id}/{timestamp_millis}_{suffix:08x}_{index}.{ext}"),
        None => format!("{group_id}/{timestamp_millis}_{suffix:08x}_{index}"),
    }
}

fn extension(filename: &str) -> Option<&str> {
    let ext = filename.rsplit('.').next()?;
    if ext.len() > 8 || ext.is_empty() || ext == filename {
        return None;
    }
    ext.chars()
        .all(|c| c.is_ascii_alphanumeric())
        .then_some(ext)
}

/// Storage error body shape.
#[derive(Debug, Deserialize)]
struct StorageErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
}

/// Blob storage over the backend's storage REST endpoint.
#[derive(Debug, Clone)]
pub struct RestStorage {
    client: Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl RestStorage {
    pub fn new(base_url: &str, api_key: &str, bucket: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            bucket: bucket.to_string(),
        }
    }
}

#[async_trait]
impl BlobStorage for RestStorage {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, GatewayError> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key);
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(key.to_string());
        }

        let body = response.text().await.unwrap_or_default();
        if let Ok(err) = serde_json::from_str::<StorageErrorBody>(&body) {
            // The storage layer reports a missing container in the error/message
            // fields rather than with a dedicated code.
            if err.error.contains("Bucket not found") || err.message.contains("Bucket not found") {
                return Err(GatewayError::BucketNotFound(self.bucket.clone()));
            }
            if !err.message.is_empty() {
                return Err(GatewayError::Api {
                    code: status.as_u16().to_string(),
                    message: err.message,
                });
            }
        }
        Err(GatewayError::Api {
            code: status.as_u16().to_string(),
            message: body,
        })
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }
}
