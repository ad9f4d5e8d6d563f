//! Comment models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Commenter identity used for automatically generated comments.
pub const AI_COMMENTER: &str = "AI";

/// A comment as stored in the backend `comments` table.
///
/// `created_at` is server-assigned and drives both ordering (oldest first)
/// and the "time ago" display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub update_id: Uuid,
    pub commenter_name: String,
    pub content: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Normalized comment fields, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub commenter_name: String,
    pub content: String,
}

/// Raw comment form values, as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentDraft {
    #[serde(default)]
    pub commenter_name: String,
    #[serde(default)]
    pub content: String,
}

impl CommentDraft {
    /// Required-field check. Runs before any network call.
    pub fn validate(&self) -> Result<NewComment, String> {
        let commenter_name = self.commenter_name.trim();
        let content = self.content.trim();
        if commenter_name.is_empty() || content.is_empty() {
            return Err("이름과 댓글 내용을 모두 입력해주세요.".to_string());
        }
        Ok(NewComment {
            commenter_name: commenter_name.to_string(),
            content: content.to_string(),
        })
    }

    /// Seeds the edit form from a comment's current values.
    pub fn from_comment(comment: &Comment) -> Self {
        Self {
            commenter_name: comment.commenter_name.clone(),
            content: comment.content.clone(),
        }
    }
}
