//! Generic table API contract.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::GatewayError;

/// A conjunction of equality predicates.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    predicates: Vec<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.predicates.push((column.to_string(), value.to_string()));
        self
    }

    pub fn predicates(&self) -> &[(String, String)] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// One ordering term; earlier terms take precedence.
#[derive(Debug, Clone)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: Direction::Desc,
        }
    }
}

/// The generic table API the backend exposes.
///
/// Rows travel as JSON objects; the typed stores in [`crate::stores`] own
/// the (de)serialization. Inserts return the created rows so server-assigned
/// columns (id, created_at) are visible to the caller.
#[async_trait]
pub trait TableGateway: Send + Sync {
    async fn select(
        &self,
        table: &str,
        filter: Filter,
        order: &[Order],
    ) -> Result<Vec<Value>, GatewayError>;

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, GatewayError>;

    async fn update(&self, table: &str, patch: Value, filter: Filter)
        -> Result<(), GatewayError>;

    async fn delete(&self, table: &str, filter: Filter) -> Result<(), GatewayError>;
}
