//! Typed per-entity operations over the table gateway.
//!
//! One store per entity, in the repository style: the store owns the table
//! name, canonical orderings, and row (de)serialization; callers never see
//! raw rows.

mod comment;
mod group;
mod member;
mod update;

pub use comment::CommentStore;
pub use group::GroupStore;
pub use member::MemberStore;
pub use update::UpdateStore;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::GatewayError;

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, GatewayError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(GatewayError::from))
        .collect()
}

fn decode_first<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Option<T>, GatewayError> {
    match rows.into_iter().next() {
        Some(row) => Ok(Some(serde_json::from_value(row)?)),
        None => Ok(None),
    }
}

/// The inserted row came back empty, which the backend contract forbids.
fn missing_representation(table: &str) -> GatewayError {
    GatewayError::Api {
        code: "500".to_string(),
        message: format!("insert into {table} returned no representation"),
    }
}
