//! Comment store.

use std::sync::Arc;

use domain::models::comment::{Comment, NewComment};
use serde_json::json;
use uuid::Uuid;

use crate::error::GatewayError;
use crate::stores::{decode_first, decode_rows, missing_representation};
use crate::table::{Filter, Order, TableGateway};

const TABLE: &str = "comments";

/// Store for comment rows.
#[derive(Clone)]
pub struct CommentStore {
    gateway: Arc<dyn TableGateway>,
}

impl CommentStore {
    pub fn new(gateway: Arc<dyn TableGateway>) -> Self {
        Self { gateway }
    }

    /// Comments under one update, oldest first.
    pub async fn list_for_update(&self, update_id: Uuid) -> Result<Vec<Comment>, GatewayError> {
        let rows = self
            .gateway
            .select(
                TABLE,
                Filter::new().eq("update_id", update_id),
                &[Order::asc("created_at")],
            )
            .await?;
        decode_rows(rows)
    }

    pub async fn create(
        &self,
        update_id: Uuid,
        comment: &NewComment,
    ) -> Result<Comment, GatewayError> {
        let rows = self
            .gateway
            .insert(
                TABLE,
                vec![json!({
                    "update_id": update_id,
                    "commenter_name": comment.commenter_name,
                    "content": comment.content,
                })],
            )
            .await?;
        decode_first(rows)?.ok_or_else(|| missing_representation(TABLE))
    }

    pub async fn save(&self, id: Uuid, comment: &NewComment) -> Result<(), GatewayError> {
        self.gateway
            .update(
                TABLE,
                json!({
                    "commenter_name": comment.commenter_name,
                    "content": comment.content,
                }),
                Filter::new().eq("id", id),
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), GatewayError> {
        self.gateway.delete(TABLE, Filter::new().eq("id", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGateway;

    fn store() -> CommentStore {
        CommentStore::new(Arc::new(MemoryGateway::new()))
    }

    fn new_comment(name: &str, content: &str) -> NewComment {
        NewComment {
            commenter_name: name.to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_is_oldest_first() {
        let store = store();
        let update_id = Uuid::new_v4();

        store
            .create(update_id, &new_comment("김구", "첫 댓글"))
            .await
            .unwrap();
        store
            .create(update_id, &new_comment("조원일", "둘째 댓글"))
            .await
            .unwrap();

        let comments = store.list_for_update(update_id).await.unwrap();
        assert_eq!(comments[0].content, "첫 댓글");
        assert_eq!(comments[1].content, "둘째 댓글");
    }

    #[tokio::test]
    async fn test_list_scoped_to_update() {
        let store = store();
        let update_id = Uuid::new_v4();
        store
            .create(update_id, &new_comment("김구", "여기"))
            .await
            .unwrap();
        store
            .create(Uuid::new_v4(), &new_comment("김구", "저기"))
            .await
            .unwrap();

        assert_eq!(store.list_for_update(update_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_and_delete() {
        let store = store();
        let update_id = Uuid::new_v4();
        let comment = store
            .create(update_id, &new_comment("김구", "수정 전"))
            .await
            .unwrap();

        store
            .save(comment.id, &new_comment("김구", "수정 후"))
            .await
            .unwrap();
        let comments = store.list_for_update(update_id).await.unwrap();
        assert_eq!(comments[0].content, "수정 후");

        store.delete(comment.id).await.unwrap();
        assert!(store.list_for_update(update_id).await.unwrap().is_empty());
    }
}
