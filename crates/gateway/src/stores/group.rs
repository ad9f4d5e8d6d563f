//! Group store.

use std::sync::Arc;

use domain::models::group::{Group, GroupInfo};
use serde_json::json;
use uuid::Uuid;

use crate::error::GatewayError;
use crate::stores::{decode_first, decode_rows, missing_representation};
use crate::table::{Filter, Order, TableGateway};

const TABLE: &str = "groups";

/// Store for group rows.
#[derive(Clone)]
pub struct GroupStore {
    gateway: Arc<dyn TableGateway>,
}

impl GroupStore {
    pub fn new(gateway: Arc<dyn TableGateway>) -> Self {
        Self { gateway }
    }

    /// All groups, oldest first.
    pub async fn list(&self) -> Result<Vec<Group>, GatewayError> {
        let rows = self
            .gateway
            .select(TABLE, Filter::new(), &[Order::asc("created_at")])
            .await?;
        decode_rows(rows)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Group>, GatewayError> {
        let rows = self
            .gateway
            .select(TABLE, Filter::new().eq("id", id), &[])
            .await?;
        decode_first(rows)
    }

    /// Creates a group. A name collision surfaces as
    /// [`GatewayError::UniqueViolation`].
    pub async fn create(&self, name: &str) -> Result<Group, GatewayError> {
        let rows = self
            .gateway
            .insert(TABLE, vec![json!({ "name": name })])
            .await?;
        decode_first(rows)?.ok_or_else(|| missing_representation(TABLE))
    }

    /// Overwrites the meeting/leader info. `None` fields clear their columns.
    pub async fn save_info(&self, id: Uuid, info: &GroupInfo) -> Result<(), GatewayError> {
        let patch = json!({
            "leader_name": info.leader_name,
            "meeting_date": info.meeting_date,
            "meeting_time": info.meeting_time,
            "meeting_place": info.meeting_place,
            "next_meeting_date": info.next_meeting_date,
            "next_meeting_time": info.next_meeting_time,
            "next_meeting_place": info.next_meeting_place,
        });
        self.gateway
            .update(TABLE, patch, Filter::new().eq("id", id))
            .await
    }
}
