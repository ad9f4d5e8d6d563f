//! Group models: the named collection of members sharing one board.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A group as stored in the backend `groups` table.
///
/// The group name is globally unique (enforced by the backend's unique
/// constraint). `leader_name` doubles as the entry-gate secret: a group
/// without a leader is open to everyone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub leader_name: Option<String>,
    #[serde(default)]
    pub meeting_date: Option<NaiveDate>,
    #[serde(default)]
    pub meeting_time: Option<String>,
    #[serde(default)]
    pub meeting_place: Option<String>,
    #[serde(default)]
    pub next_meeting_date: Option<NaiveDate>,
    #[serde(default)]
    pub next_meeting_time: Option<String>,
    #[serde(default)]
    pub next_meeting_place: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn has_leader(&self) -> bool {
        self.leader_name.as_deref().is_some_and(|l| !l.is_empty())
    }
}

/// Raw group-creation form values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupDraft {
    #[serde(default)]
    pub name: String,
}

impl GroupDraft {
    /// Required-field check. Runs before any network call.
    pub fn validate(&self) -> Result<String, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("모임 이름을 입력해주세요.".to_string());
        }
        Ok(name.to_string())
    }
}

/// Normalized meeting/leader info, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    pub leader_name: Option<String>,
    pub meeting_date: Option<NaiveDate>,
    pub meeting_time: Option<String>,
    pub meeting_place: Option<String>,
    pub next_meeting_date: Option<NaiveDate>,
    pub next_meeting_time: Option<String>,
    pub next_meeting_place: Option<String>,
}

/// Raw info-edit form values, as submitted.
///
/// Kept as strings so a failed save can re-render the edit form with the
/// user's in-progress values intact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupInfoDraft {
    #[serde(default)]
    pub leader_name: String,
    #[serde(default)]
    pub meeting_date: String,
    #[serde(default)]
    pub meeting_time: String,
    #[serde(default)]
    pub meeting_place: String,
    #[serde(default)]
    pub next_meeting_date: String,
    #[serde(default)]
    pub next_meeting_time: String,
    #[serde(default)]
    pub next_meeting_place: String,
}

impl GroupInfoDraft {
    /// Normalizes blanks to `None`, parses dates, and checks that a non-empty
    /// leader name references one of the group's current members.
    pub fn validate(&self, member_names: &[String]) -> Result<GroupInfo, String> {
        let leader_name = none_if_blank(&self.leader_name);
        if let Some(leader) = &leader_name {
            if !member_names.iter().any(|n| n == leader) {
                return Err("리더는 모임 멤버 중에서 선택해야 합니다.".to_string());
            }
        }
        Ok(GroupInfo {
            leader_name,
            meeting_date: parse_date(&self.meeting_date)?,
            meeting_time: none_if_blank(&self.meeting_time),
            meeting_place: none_if_blank(&self.meeting_place),
            next_meeting_date: parse_date(&self.next_meeting_date)?,
            next_meeting_time: none_if_blank(&self.next_meeting_time),
            next_meeting_place: none_if_blank(&self.next_meeting_place),
        })
    }

    /// Seeds the edit form from a group's current values.
    pub fn from_group(group: &Group) -> Self {
        Self {
            leader_name: group.leader_name.clone().unwrap_or_default(),
            meeting_date: date_str(group.meeting_date),
            meeting_time: group.meeting_time.clone().unwrap_or_default(),
            meeting_place: group.meeting_place.clone().unwrap_or_default(),
            next_meeting_date: date_str(group.next_meeting_date),
            next_meeting_time: group.next_meeting_time.clone().unwrap_or_default(),
            next_meeting_place: group.next_meeting_place.clone().unwrap_or_default(),
        }
    }
}

pub(crate) fn none_if_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_date(value: &str) -> Result<Option<NaiveDate>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<NaiveDate>()
        .map(Some)
        .map_err(|_| "날짜 형식이 올바르지 않습니다.".to_string())
}

fn date_str(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}
