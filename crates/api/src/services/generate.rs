//! HTTP comment generation.

use std::time::Duration;

use async_trait::async_trait;
use domain::services::{CommentGenerator, SideEffectError};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    update_content: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    comment: String,
}

/// Comment generator posting an update's content block to a single
/// configured endpoint.
pub struct HttpCommentGenerator {
    client: Client,
    url: String,
}

impl HttpCommentGenerator {
    pub fn new(url: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl CommentGenerator for HttpCommentGenerator {
    async fn generate(&self, update_content: &str) -> Result<Option<String>, SideEffectError> {
        let response = self
            .client
            .post(&self.url)
            .json(&GenerateRequest { update_content })
            .send()
            .await
            .map_err(|e| SideEffectError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SideEffectError::Rejected(format!("status {status}")));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SideEffectError::Transport(e.to_string()))?;

        let comment = body.comment.trim();
        if comment.is_empty() {
            Ok(None)
        } else {
            Ok(Some(comment.to_string()))
        }
    }
}
