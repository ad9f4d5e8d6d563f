//! Update store.

use std::sync::Arc;

use domain::models::update::{NewUpdate, Update};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::GatewayError;
use crate::stores::{decode_first, decode_rows, missing_representation};
use crate::table::{Filter, Order, TableGateway};

const TABLE: &str = "updates";

/// Store for update rows.
#[derive(Clone)]
pub struct UpdateStore {
    gateway: Arc<dyn TableGateway>,
}

impl UpdateStore {
    pub fn new(gateway: Arc<dyn TableGateway>) -> Self {
        Self { gateway }
    }

    /// Updates of one group: newest date first, ties broken by creation
    /// time, newest first.
    pub async fn list_for_group(&self, group_id: Uuid) -> Result<Vec<Update>, GatewayError> {
        let rows = self
            .gateway
            .select(
                TABLE,
                Filter::new().eq("group_id", group_id),
                &[Order::desc("date"), Order::desc("created_at")],
            )
            .await?;
        decode_rows(rows)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Update>, GatewayError> {
        let rows = self
            .gateway
            .select(TABLE, Filter::new().eq("id", id), &[])
            .await?;
        decode_first(rows)
    }

    pub async fn create(
        &self,
        group_id: Uuid,
        update: &NewUpdate,
        image_urls: &[String],
    ) -> Result<Update, GatewayError> {
        let mut row = Self::fields(update);
        row["group_id"] = json!(group_id);
        row["image_urls"] = image_urls_value(image_urls);
        let rows = self.gateway.insert(TABLE, vec![row]).await?;
        decode_first(rows)?.ok_or_else(|| missing_representation(TABLE))
    }

    pub async fn save(
        &self,
        id: Uuid,
        update: &NewUpdate,
        image_urls: &[String],
    ) -> Result<(), GatewayError> {
        let mut patch = Self::fields(update);
        patch["image_urls"] = image_urls_value(image_urls);
        self.gateway
            .update(TABLE, patch, Filter::new().eq("id", id))
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), GatewayError> {
        self.gateway.delete(TABLE, Filter::new().eq("id", id)).await
    }

    fn fields(update: &NewUpdate) -> Value {
        json!({
            "name": update.name,
            "date": update.date,
            "work_life": update.work_life,
            "hobby_life": update.hobby_life,
            "health_care": update.health_care,
            "family_news": update.family_news,
            "recent_interests": update.recent_interests,
        })
    }
}

fn image_urls_value(image_urls: &[String]) -> Value {
    if image_urls.is_empty() {
        Value::Null
    } else {
        json!(image_urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGateway;
    use chrono::NaiveDate;

    fn store() -> UpdateStore {
        UpdateStore::new(Arc::new(MemoryGateway::new()))
    }

    fn new_update(name: &str, date: &str) -> NewUpdate {
        NewUpdate {
            name: name.to_string(),
            date: date.parse().unwrap(),
            work_life: Some("일".to_string()),
            hobby_life: None,
            health_care: None,
            family_news: None,
            recent_interests: None,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_date_then_creation() {
        let store = store();
        let group_id = Uuid::new_v4();

        store
            .create(group_id, &new_update("김구", "2026-08-01"), &[])
            .await
            .unwrap();
        let older_same_day = store
            .create(group_id, &new_update("조원일", "2026-08-06"), &[])
            .await
            .unwrap();
        let newer_same_day = store
            .create(group_id, &new_update("이병근", "2026-08-06"), &[])
            .await
            .unwrap();

        let updates = store.list_for_group(group_id).await.unwrap();
        let ids: Vec<Uuid> = updates.iter().map(|u| u.id).collect();
        // Same-day entries: later creation first; the older date last.
        assert_eq!(ids[0], newer_same_day.id);
        assert_eq!(ids[1], older_same_day.id);
        assert_eq!(updates[2].date, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
    }

    #[tokio::test]
    async fn test_list_scoped_to_group() {
        let store = store();
        let group_id = Uuid::new_v4();
        store
            .create(group_id, &new_update("김구", "2026-08-01"), &[])
            .await
            .unwrap();
        store
            .create(Uuid::new_v4(), &new_update("남", "2026-08-02"), &[])
            .await
            .unwrap();

        assert_eq!(store.list_for_group(group_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_replaces_images() {
        let store = store();
        let group_id = Uuid::new_v4();
        let created = store
            .create(group_id, &new_update("김구", "2026-08-01"), &[])
            .await
            .unwrap();

        store
            .save(
                created.id,
                &new_update("김구", "2026-08-01"),
                &["b.png".to_string(), "new.png".to_string()],
            )
            .await
            .unwrap();

        let found = store.find(created.id).await.unwrap().unwrap();
        assert_eq!(found.images(), vec!["b.png", "new.png"]);
    }

    #[tokio::test]
    async fn test_save_with_no_images_clears_column() {
        let store = store();
        let group_id = Uuid::new_v4();
        let created = store
            .create(group_id, &new_update("김구", "2026-08-01"), &[])
            .await
            .unwrap();

        store
            .save(created.id, &new_update("김구", "2026-08-01"), &[])
            .await
            .unwrap();
        let found = store.find(created.id).await.unwrap().unwrap();
        assert!(found.images().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = store();
        let group_id = Uuid::new_v4();
        let created = store
            .create(group_id, &new_update("김구", "2026-08-01"), &[])
            .await
            .unwrap();
        store.delete(created.id).await.unwrap();
        assert!(store.find(created.id).await.unwrap().is_none());
    }
}
