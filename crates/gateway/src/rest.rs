//! PostgREST-dialect HTTP implementation of the table gateway.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::error::GatewayError;
use crate::table::{Direction, Filter, Order, TableGateway};

/// Error body shape returned by the backend's REST layer.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Table gateway over a PostgREST-style endpoint.
///
/// Filters become `column=eq.value` query parameters; ordering becomes a
/// single `order=` parameter. Inserts ask for the created representation
/// back so server-assigned columns reach the caller.
#[derive(Debug, Clone)]
pub struct RestGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestGateway {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    fn query_params(filter: &Filter, order: &[Order]) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = filter
            .predicates()
            .iter()
            .map(|(column, value)| (column.clone(), format!("eq.{}", value)))
            .collect();
        if !order.is_empty() {
            let spec = order
                .iter()
                .map(|o| {
                    let dir = match o.direction {
                        Direction::Asc => "asc",
                        Direction::Desc => "desc",
                    };
                    format!("{}.{}", o.column, dir)
                })
                .collect::<Vec<_>>()
                .join(",");
            params.push(("order".to_string(), spec));
        }
        params
    }

    async fn check(&self, response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = %status, body = %body, "backend rejected request");
        Err(decode_error(status, &body))
    }
}

fn decode_error(status: StatusCode, body: &str) -> GatewayError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(api) if !api.message.is_empty() => GatewayError::from_api(api.code, api.message),
        _ => GatewayError::Api {
            code: status.as_u16().to_string(),
            message: body.to_string(),
        },
    }
}

#[async_trait]
impl TableGateway for RestGateway {
    async fn select(
        &self,
        table: &str,
        filter: Filter,
        order: &[Order],
    ) -> Result<Vec<Value>, GatewayError> {
        let params = Self::query_params(&filter, order);
        let response = self
            .authed(self.client.get(self.table_url(table)).query(&params))
            .send()
            .await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, GatewayError> {
        let response = self
            .authed(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await?;
        let response = self.check(response).await?;
        Ok(response.json().await?)
    }

    async fn update(
        &self,
        table: &str,
        patch: Value,
        filter: Filter,
    ) -> Result<(), GatewayError> {
        let params = Self::query_params(&filter, &[]);
        let response = self
            .authed(self.client.patch(self.table_url(table)).query(&params))
            .json(&patch)
            .send()
            .await?;
        self.check(response).await?;
        Ok(())
    }

    async fn delete(&self, table: &str, filter: Filter) -> Result<(), GatewayError> {
        let params = Self::query_params(&filter, &[]);
        let response = self
            .authed(self.client.delete(self.table_url(table)).query(&params))
            .send()
            .await?;
        self.check(response).await?;
        Ok(())
    }
}
