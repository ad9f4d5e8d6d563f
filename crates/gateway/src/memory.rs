//! In-memory gateway for tests and local development.
//!
//! Emulates the behavior the stores rely on: equality filtering, multi-term
//! ordering, server-assigned `id`/`created_at`, and per-table unique keys
//! (so duplicate-name handling is exercisable without a real backend).

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::GatewayError;
use crate::storage::BlobStorage;
use crate::table::{Direction, Filter, Order, TableGateway};

/// In-memory table gateway.
pub struct MemoryGateway {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    unique_keys: HashMap<String, Vec<Vec<String>>>,
}

impl MemoryGateway {
    /// A gateway preconfigured with the board schema's unique keys.
    pub fn new() -> Self {
        Self::empty()
            .with_unique("groups", &["name"])
            .with_unique("members", &["group_id", "name"])
    }

    /// A gateway with no unique keys configured.
    pub fn empty() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
            unique_keys: HashMap::new(),
        }
    }

    pub fn with_unique(mut self, table: &str, columns: &[&str]) -> Self {
        self.unique_keys
            .entry(table.to_string())
            .or_default()
            .push(columns.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Number of rows currently in a table.
    pub fn row_count(&self, table: &str) -> usize {
        self.tables
            .lock()
            .expect("memory gateway poisoned")
            .get(table)
            .map(|rows| rows.len())
            .unwrap_or(0)
    }

    fn unique_conflict(
        &self,
        table: &str,
        row: &Value,
        existing: &[Value],
    ) -> Option<String> {
        for columns in self.unique_keys.get(table)? {
            let candidate: Vec<Option<String>> = columns
                .iter()
                .map(|c| row.get(c).map(value_text))
                .collect();
            if candidate.iter().any(Option::is_none) {
                continue;
            }
            let clash = existing.iter().any(|other| {
                columns
                    .iter()
                    .zip(&candidate)
                    .all(|(c, v)| other.get(c).map(value_text).as_ref() == v.as_ref())
            });
            if clash {
                return Some(format!(
                    "duplicate key value violates unique constraint \"{}_{}_key\"",
                    table,
                    columns.join("_")
                ));
            }
        }
        None
    }
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn matches(row: &Value, filter: &Filter) -> bool {
    filter
        .predicates()
        .iter()
        .all(|(column, expected)| row.get(column).map(value_text).as_deref() == Some(expected))
}

fn compare(a: &Value, b: &Value, order: &[Order]) -> Ordering {
    for term in order {
        // Missing/null sorts first; string comparison is enough for the
        // columns the board orders by (ISO dates, RFC 3339 timestamps, names).
        let left = a.get(&term.column).filter(|v| !v.is_null()).map(value_text);
        let right = b.get(&term.column).filter(|v| !v.is_null()).map(value_text);
        let ord = left.cmp(&right);
        let ord = match term.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

#[async_trait]
impl TableGateway for MemoryGateway {
    async fn select(
        &self,
        table: &str,
        filter: Filter,
        order: &[Order],
    ) -> Result<Vec<Value>, GatewayError> {
        let tables = self.tables.lock().expect("memory gateway poisoned");
        let mut rows: Vec<Value> = tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| matches(r, &filter)).cloned().collect())
            .unwrap_or_default();
        rows.sort_by(|a, b| compare(a, b, order));
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, GatewayError> {
        let mut tables = self.tables.lock().expect("memory gateway poisoned");
        let stored = tables.entry(table.to_string()).or_default();

        let mut created = Vec::with_capacity(rows.len());
        for row in rows {
            let mut row = match row {
                Value::Object(map) => map,
                other => {
                    return Err(GatewayError::Api {
                        code: "400".to_string(),
                        message: format!("expected object row, got {other}"),
                    })
                }
            };
            row.entry("id".to_string())
                .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
            row.entry("created_at".to_string()).or_insert_with(|| {
                Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
            });
            let row = Value::Object(row);

            let mut all: Vec<Value> = stored.clone();
            all.extend(created.iter().cloned());
            if let Some(message) = self.unique_conflict(table, &row, &all) {
                return Err(GatewayError::UniqueViolation(message));
            }
            created.push(row);
        }

        stored.extend(created.iter().cloned());
        Ok(created)
    }

    async fn update(
        &self,
        table: &str,
        patch: Value,
        filter: Filter,
    ) -> Result<(), GatewayError> {
        let patch = match patch {
            Value::Object(map) => map,
            other => {
                return Err(GatewayError::Api {
                    code: "400".to_string(),
                    message: format!("expected object patch, got {other}"),
                })
            }
        };
        let mut tables = self.tables.lock().expect("memory gateway poisoned");
        if let Some(rows) = tables.get_mut(table) {
            let untouched: Vec<Value> = rows.iter().filter(|r| !matches(r, &filter)).cloned().collect();
            for row in rows.iter_mut().filter(|r| matches(r, &filter)) {
                let patched = apply_patch(row, &patch);
                if let Some(message) = self.unique_conflict(table, &patched, &untouched) {
                    return Err(GatewayError::UniqueViolation(message));
                }
                *row = patched;
            }
        }
        Ok(())
    }

    async fn delete(&self, table: &str, filter: Filter) -> Result<(), GatewayError> {
        let mut tables = self.tables.lock().expect("memory gateway poisoned");
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|r| !matches(r, &filter));
        }
        Ok(())
    }
}

fn apply_patch(row: &Value, patch: &Map<String, Value>) -> Value {
    let mut merged = row.as_object().cloned().unwrap_or_default();
    for (key, value) in patch {
        merged.insert(key.clone(), value.clone());
    }
    Value::Object(merged)
}

/// In-memory blob storage.
pub struct MemoryStorage {
    bucket: String,
    bucket_exists: bool,
    objects: Mutex<HashMap<String, usize>>,
}

impl MemoryStorage {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            bucket_exists: true,
            objects: Mutex::new(HashMap::new()),
        }
    }

    /// Simulates a storage backend whose bucket was never created.
    pub fn missing_bucket(bucket: &str) -> Self {
        Self {
            bucket_exists: false,
            ..Self::new(bucket)
        }
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().expect("memory storage poisoned").len()
    }
}

#[async_trait]
impl BlobStorage for MemoryStorage {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, GatewayError> {
        if !self.bucket_exists {
            return Err(GatewayError::BucketNotFound(self.bucket.clone()));
        }
        self.objects
            .lock()
            .expect("memory storage poisoned")
            .insert(key.to_string(), bytes.len());
        Ok(key.to_string())
    }

    fn public_url(&self, path: &str) -> String {
        format!("memory://{}/{}", self.bucket, path)
    }
}
