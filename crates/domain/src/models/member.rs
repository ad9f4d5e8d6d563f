//! Member models: people belonging to a group.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::group::none_if_blank;

/// A member as stored in the backend `members` table.
///
/// Names are unique within a group (backend constraint). Email is optional
/// and independently editable in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub group_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Raw member form values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Normalized member fields, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub email: Option<String>,
}

impl MemberDraft {
    /// Required-field and email-shape checks. Runs before any network call.
    pub fn validate(&self) -> Result<NewMember, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("이름을 입력해주세요.".to_string());
        }
        let email = none_if_blank(&self.email);
        if let Some(email) = &email {
            shared::validation::validate_email_shape(email)
                .map_err(|e| e.message.map(|m| m.to_string()).unwrap_or_default())?;
        }
        Ok(NewMember {
            name: name.to_string(),
            email,
        })
    }
}

/// Validates a standalone email edit (the in-place email form).
pub fn validate_email_edit(email: &str) -> Result<Option<String>, String> {
    match none_if_blank(email) {
        None => Ok(None),
        Some(email) => {
            shared::validation::validate_email_shape(&email)
                .map_err(|e| e.message.map(|m| m.to_string()).unwrap_or_default())?;
            Ok(Some(email))
        }
    }
}
