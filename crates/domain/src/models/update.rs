//! Update models: one member's periodic status post.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::comment::Comment;
use crate::models::group::none_if_blank;

/// The five optional free-text fields, in display order, with their labels.
pub const UPDATE_FIELDS: [(&str, &str); 5] = [
    ("work_life", "회사생활"),
    ("hobby_life", "취미생활"),
    ("health_care", "건강관리"),
    ("family_news", "가족들 소식"),
    ("recent_interests", "최근 관심사"),
];

/// An update as stored in the backend `updates` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub id: Uuid,
    pub group_id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub work_life: Option<String>,
    #[serde(default)]
    pub hobby_life: Option<String>,
    #[serde(default)]
    pub health_care: Option<String>,
    #[serde(default)]
    pub family_news: Option<String>,
    #[serde(default)]
    pub recent_interests: Option<String>,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
    /// Legacy singular image column, still read for records written before
    /// multi-image support.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Update {
    fn field(&self, column: &str) -> Option<&str> {
        match column {
            "work_life" => self.work_life.as_deref(),
            "hobby_life" => self.hobby_life.as_deref(),
            "health_care" => self.health_care.as_deref(),
            "family_news" => self.family_news.as_deref(),
            "recent_interests" => self.recent_interests.as_deref(),
            _ => None,
        }
    }

    /// The populated fields in display order, paired with their labels.
    pub fn labeled_fields(&self) -> Vec<(&'static str, &str)> {
        UPDATE_FIELDS
            .iter()
            .filter_map(|(column, label)| self.field(column).map(|value| (*label, value)))
            .filter(|(_, value)| !value.is_empty())
            .collect()
    }

    /// Attached image URLs, newest schema first with legacy fallback.
    pub fn images(&self) -> Vec<String> {
        match &self.image_urls {
            Some(urls) if !urls.is_empty() => urls.clone(),
            _ => self.image_url.iter().cloned().collect(),
        }
    }

    /// Concatenates the populated fields into a `label: value` block, one
    /// line per field. An all-empty update yields an empty string, which
    /// suppresses comment generation.
    pub fn content_block(&self) -> String {
        self.labeled_fields()
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// An update enriched with its comments for rendering.
#[derive(Debug, Clone)]
pub struct UpdateWithComments {
    pub update: Update,
    pub comments: Vec<Comment>,
}

/// Normalized update fields, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUpdate {
    pub name: String,
    pub date: NaiveDate,
    pub work_life: Option<String>,
    pub hobby_life: Option<String>,
    pub health_care: Option<String>,
    pub family_news: Option<String>,
    pub recent_interests: Option<String>,
}

/// Raw update form values, as submitted.
///
/// Kept as strings so both a validation failure and a failed save can
/// re-render the form with the user's in-progress values intact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub work_life: String,
    #[serde(default)]
    pub hobby_life: String,
    #[serde(default)]
    pub health_care: String,
    #[serde(default)]
    pub family_news: String,
    #[serde(default)]
    pub recent_interests: String,
}

impl UpdateDraft {
    /// Required-field check (name and date). Runs before any network call.
    pub fn validate(&self) -> Result<NewUpdate, String> {
        let name = self.name.trim();
        let date = self.date.trim();
        if name.is_empty() || date.is_empty() {
            return Err("이름과 날짜는 필수 입력 항목입니다.".to_string());
        }
        let date = date
            .parse::<NaiveDate>()
            .map_err(|_| "이름과 날짜는 필수 입력 항목입니다.".to_string())?;
        Ok(NewUpdate {
            name: name.to_string(),
            date,
            work_life: none_if_blank(&self.work_life),
            hobby_life: none_if_blank(&self.hobby_life),
            health_care: none_if_blank(&self.health_care),
            family_news: none_if_blank(&self.family_news),
            recent_interests: none_if_blank(&self.recent_interests),
        })
    }

    /// Seeds the edit form from an update's current values.
    pub fn from_update(update: &Update) -> Self {
        Self {
            name: update.name.clone(),
            date: update.date.to_string(),
            work_life: update.work_life.clone().unwrap_or_default(),
            hobby_life: update.hobby_life.clone().unwrap_or_default(),
            health_care: update.health_care.clone().unwrap_or_default(),
            family_news: update.family_news.clone().unwrap_or_default(),
            recent_interests: update.recent_interests.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update() -> Update {
        Update {
            id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
            name: "김구".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
            work_life: Some("새 프로젝트 시작".to_string()),
            hobby_life: None,
            health_care: Some("아침 달리기".to_string()),
            family_news: None,
            recent_interests: None,
            image_urls: None,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_labeled_fields_keeps_display_order() {
        let u = update();
        let fields = u.labeled_fields();
        assert_eq!(
            fields,
            vec![("회사생활", "새 프로젝트 시작"), ("건강관리", "아침 달리기")]
        );
    }

    #[test]
    fn test_labeled_fields_empty_when_nothing_written() {
        let mut u = update();
        u.work_life = None;
        u.health_care = None;
        assert!(u.labeled_fields().is_empty());
    }

    #[test]
    fn test_content_block_joins_labels_and_values() {
        assert_eq!(
            update().content_block(),
            "회사생활: 새 프로젝트 시작\n건강관리: 아침 달리기"
        );
    }

    #[test]
    fn test_content_block_empty_for_blank_update() {
        let mut u = update();
        u.work_life = None;
        u.health_care = None;
        assert_eq!(u.content_block(), "");
    }

    #[test]
    fn test_images_prefers_plural_column() {
        let mut u = update();
        u.image_urls = Some(vec!["a.png".to_string(), "b.png".to_string()]);
        u.image_url = Some("legacy.png".to_string());
        assert_eq!(u.images(), vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_images_falls_back_to_legacy_column() {
        let mut u = update();
        u.image_url = Some("legacy.png".to_string());
        assert_eq!(u.images(), vec!["legacy.png"]);

        u.image_urls = Some(vec![]);
        assert_eq!(u.images(), vec!["legacy.png"]);
    }

    #[test]
    fn test_draft_requires_name_and_date() {
        let mut draft = UpdateDraft {
            name: "".into(),
            date: "2026-08-06".into(),
            ..Default::default()
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            "이름과 날짜는 필수 입력 항목입니다."
        );

        draft.name = "김구".into();
        draft.date = "".into();
        assert!(draft.validate().is_err());

        draft.date = "2026-08-06".into();
        let new = draft.validate().unwrap();
        assert_eq!(new.name, "김구");
        assert_eq!(new.date, NaiveDate::from_ymd_opt(2026, 8, 6).unwrap());
    }

    #[test]
    fn test_draft_blank_fields_become_none() {
        let draft = UpdateDraft {
            name: "김구".into(),
            date: "2026-08-06".into(),
            work_life: "  ".into(),
            hobby_life: "등산".into(),
            ..Default::default()
        };
        let new = draft.validate().unwrap();
        assert_eq!(new.work_life, None);
        assert_eq!(new.hobby_life.as_deref(), Some("등산"));
    }

    #[test]
    fn test_draft_round_trips_update_values() {
        let u = update();
        let draft = UpdateDraft::from_update(&u);
        assert_eq!(draft.name, "김구");
        assert_eq!(draft.date, "2026-08-06");
        assert_eq!(draft.work_life, "새 프로젝트 시작");
        assert_eq!(draft.hobby_life, "");
    }
}
