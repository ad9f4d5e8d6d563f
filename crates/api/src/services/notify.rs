//! HTTP notification dispatch.

use std::time::Duration;

use async_trait::async_trait;
use domain::services::{BoardEvent, BoardNotifier, NotifyOutcome, SideEffectError};
use reqwest::Client;
use serde::Deserialize;

/// Response shape of the notification endpoint.
#[derive(Debug, Deserialize)]
struct NotifyResponse {
    success: bool,
    #[serde(default)]
    sent: Option<u32>,
    #[serde(default)]
    error: Option<String>,
}

/// Notifier posting board events to a single configured endpoint.
pub struct HttpNotifier {
    client: Client,
    url: String,
}

impl HttpNotifier {
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
impl BoardNotifier for HttpNotifier {
    async fn notify(&self, event: &BoardEvent) -> Result<NotifyOutcome, SideEffectError> {
        let response = self
            .client
            .post(&self.url)
            .json(event)
            .send()
            .await
            .map_err(|e| SideEffectError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SideEffectError::Rejected(format!("status {status}")));
        }

        let body: NotifyResponse = response
            .json()
            .await
            .map_err(|e| SideEffectError::Transport(e.to_string()))?;

        if body.success {
            Ok(NotifyOutcome {
                sent: body.sent.unwrap_or(0),
            })
        } else {
            Err(SideEffectError::Rejected(
                body.error.unwrap_or_else(|| "unspecified error".to_string()),
            ))
        }
    }
}
