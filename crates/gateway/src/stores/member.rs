//! Member store.

use std::sync::Arc;

use domain::models::member::{Member, NewMember};
use serde_json::json;
use uuid::Uuid;

use crate::error::GatewayError;
use crate::stores::{decode_first, decode_rows, missing_representation};
use crate::table::{Filter, Order, TableGateway};

const TABLE: &str = "members";

/// Store for member rows.
#[derive(Clone)]
pub struct MemberStore {
    gateway: Arc<dyn TableGateway>,
}

impl MemberStore {
    pub fn new(gateway: Arc<dyn TableGateway>) -> Self {
        Self { gateway }
    }

    /// Members of one group, in joining order.
    pub async fn list_for_group(&self, group_id: Uuid) -> Result<Vec<Member>, GatewayError> {
        let rows = self
            .gateway
            .select(
                TABLE,
                Filter::new().eq("group_id", group_id),
                &[Order::asc("created_at")],
            )
            .await?;
        decode_rows(rows)
    }

    /// Adds a member. A name collision within the group surfaces as
    /// [`GatewayError::UniqueViolation`].
    pub async fn create(
        &self,
        group_id: Uuid,
        member: &NewMember,
    ) -> Result<Member, GatewayError> {
        let rows = self
            .gateway
            .insert(
                TABLE,
                vec![json!({
                    "group_id": group_id,
                    "name": member.name,
                    "email": member.email,
                })],
            )
            .await?;
        decode_first(rows)?.ok_or_else(|| missing_representation(TABLE))
    }

    /// In-place email edit. `None` clears the column.
    pub async fn set_email(&self, id: Uuid, email: Option<&str>) -> Result<(), GatewayError> {
        self.gateway
            .update(TABLE, json!({ "email": email }), Filter::new().eq("id", id))
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), GatewayError> {
        self.gateway.delete(TABLE, Filter::new().eq("id", id)).await
    }
}
