//! Gateway error type.

use thiserror::Error;

/// Postgres unique-constraint violation, as reported by the backend.
pub const UNIQUE_VIOLATION_CODE: &str = "23505";

/// Errors from the table and storage gateways.
///
/// `UniqueViolation` and `BucketNotFound` are machine-distinguishable so the
/// UI can show specific messages (duplicate name, storage setup) instead of
/// the generic failure text.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("storage bucket \"{0}\" not found")]
    BucketNotFound(String),

    #[error("backend error {code}: {message}")]
    Api { code: String, message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GatewayError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, GatewayError::UniqueViolation(_))
    }

    pub fn is_missing_bucket(&self) -> bool {
        matches!(self, GatewayError::BucketNotFound(_))
    }

    /// Maps a backend error body to the specific variant when the code is
    /// recognizable.
    pub fn from_api(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        let message = message.into();
        if code == UNIQUE_VIOLATION_CODE {
            GatewayError::UniqueViolation(message)
        } else {
            GatewayError::Api { code, message }
        }
    }
}
