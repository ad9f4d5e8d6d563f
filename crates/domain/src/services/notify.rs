//! Notification and comment-generation capabilities.
//!
//! Both are best-effort side channels: implementations are called from
//! spawned tasks after the primary mutation has already succeeded, and their
//! failures are logged, never surfaced.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// What happened on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardEventKind {
    Update,
    Comment,
}

impl std::fmt::Display for BoardEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardEventKind::Update => write!(f, "update"),
            BoardEventKind::Comment => write!(f, "comment"),
        }
    }
}

/// Payload describing a board event to notify members about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardEvent {
    #[serde(rename = "type")]
    pub kind: BoardEventKind,
    pub group_id: Uuid,
    pub update_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<Uuid>,
    pub author_name: String,
}

impl BoardEvent {
    pub fn update_created(group_id: Uuid, update_id: Uuid, author_name: impl Into<String>) -> Self {
        Self {
            kind: BoardEventKind::Update,
            group_id,
            update_id,
            comment_id: None,
            author_name: author_name.into(),
        }
    }

    pub fn comment_created(
        group_id: Uuid,
        update_id: Uuid,
        comment_id: Uuid,
        author_name: impl Into<String>,
    ) -> Self {
        Self {
            kind: BoardEventKind::Comment,
            group_id,
            update_id,
            comment_id: Some(comment_id),
            author_name: author_name.into(),
        }
    }
}

/// Result of a delivered notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotifyOutcome {
    /// How many members the service reports having reached.
    pub sent: u32,
}

/// Errors from the best-effort side channels. Logged only.
#[derive(Debug, Error)]
pub enum SideEffectError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("service rejected the call: {0}")]
    Rejected(String),
}

/// Dispatches "something happened on the board" to group members.
#[async_trait]
pub trait BoardNotifier: Send + Sync {
    async fn notify(&self, event: &BoardEvent) -> Result<NotifyOutcome, SideEffectError>;
}

/// Generates an automated comment from an update's content block.
///
/// `Ok(None)` means the service produced nothing usable; callers treat that
/// the same as not calling at all.
#[async_trait]
pub trait CommentGenerator: Send + Sync {
    async fn generate(&self, update_content: &str) -> Result<Option<String>, SideEffectError>;
}
