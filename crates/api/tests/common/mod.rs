//! Common test utilities for integration tests.
//!
//! The app is assembled over the in-memory gateway and stub side channels,
//! then driven through `tower::ServiceExt::oneshot`: no sockets, no real
//! backend.

// Helper utilities intentionally available to all integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use tower::ServiceExt;

use domain::services::{
    BoardEvent, BoardNotifier, CommentGenerator, NotifyOutcome, SideEffectError,
};
use gateway::memory::{MemoryGateway, MemoryStorage};
use gateway::stores::{CommentStore, GroupStore, MemberStore, UpdateStore};
use gateway::{GatewayError, TableGateway};
use moim_board_api::app::create_app;
use moim_board_api::config::Config;

/// Notifier that records every event instead of dispatching it.
#[derive(Default)]
pub struct RecordingNotifier {
    pub events: Mutex<Vec<BoardEvent>>,
}

#[async_trait]
impl BoardNotifier for RecordingNotifier {
    async fn notify(&self, event: &BoardEvent) -> Result<NotifyOutcome, SideEffectError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(NotifyOutcome { sent: 1 })
    }
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<BoardEvent> {
        self.events.lock().unwrap().clone()
    }
}

/// Generator returning a canned comment (or nothing), counting calls.
pub struct StubGenerator {
    pub reply: Option<String>,
    pub calls: Mutex<u32>,
}

impl StubGenerator {
    pub fn new(reply: Option<&str>) -> Self {
        Self {
            reply: reply.map(String::from),
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl CommentGenerator for StubGenerator {
    async fn generate(&self, _update_content: &str) -> Result<Option<String>, SideEffectError> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.reply.clone())
    }
}

/// Gateway whose every call fails, for abort-path tests.
pub struct FailingGateway;

#[async_trait]
impl TableGateway for FailingGateway {
    async fn select(
        &self,
        _table: &str,
        _filter: gateway::Filter,
        _order: &[gateway::Order],
    ) -> Result<Vec<serde_json::Value>, GatewayError> {
        Err(unavailable())
    }

    async fn insert(
        &self,
        _table: &str,
        _rows: Vec<serde_json::Value>,
    ) -> Result<Vec<serde_json::Value>, GatewayError> {
        Err(unavailable())
    }

    async fn update(
        &self,
        _table: &str,
        _patch: serde_json::Value,
        _filter: gateway::Filter,
    ) -> Result<(), GatewayError> {
        Err(unavailable())
    }

    async fn delete(&self, _table: &str, _filter: gateway::Filter) -> Result<(), GatewayError> {
        Err(unavailable())
    }
}

fn unavailable() -> GatewayError {
    GatewayError::Api {
        code: "503".to_string(),
        message: "backend unavailable".to_string(),
    }
}

pub struct TestApp {
    pub app: Router,
    pub gateway: Arc<MemoryGateway>,
    pub storage: Arc<MemoryStorage>,
    pub notifier: Arc<RecordingNotifier>,
    pub generator: Arc<StubGenerator>,
}

impl TestApp {
    pub fn groups(&self) -> GroupStore {
        GroupStore::new(self.gateway.clone())
    }

    pub fn members(&self) -> MemberStore {
        MemberStore::new(self.gateway.clone())
    }

    pub fn updates(&self) -> UpdateStore {
        UpdateStore::new(self.gateway.clone())
    }

    pub fn comments(&self) -> CommentStore {
        CommentStore::new(self.gateway.clone())
    }
}

/// App over the in-memory gateway with a working storage bucket and a
/// generator that replies with `reply`.
pub fn create_test_app_with(reply: Option<&str>, bucket_exists: bool) -> TestApp {
    let gateway = Arc::new(MemoryGateway::new());
    let storage = Arc::new(if bucket_exists {
        MemoryStorage::new("update-images")
    } else {
        MemoryStorage::missing_bucket("update-images")
    });
    let notifier = Arc::new(RecordingNotifier::default());
    let generator = Arc::new(StubGenerator::new(reply));
    let app = create_app(
        Config::for_test(),
        gateway.clone(),
        storage.clone(),
        Some(notifier.clone()),
        Some(generator.clone()),
    );
    TestApp {
        app,
        gateway,
        storage,
        notifier,
        generator,
    }
}

pub fn create_test_app() -> TestApp {
    create_test_app_with(None, true)
}

/// App whose gateway refuses every call.
pub fn create_failing_app() -> Router {
    create_app(
        Config::for_test(),
        Arc::new(FailingGateway),
        Arc::new(MemoryStorage::new("update-images")),
        None,
        None,
    )
}

pub async fn get(app: &Router, uri: &str, cookies: &str) -> Response<Body> {
    let mut request = Request::builder().method(Method::GET).uri(uri);
    if !cookies.is_empty() {
        request = request.header(header::COOKIE, cookies);
    }
    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: &Router, uri: &str, cookies: &str, body: &str) -> Response<Body> {
    let mut request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if !cookies.is_empty() {
        request = request.header(header::COOKIE, cookies);
    }
    app.clone()
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Builds a multipart/form-data body from text fields and files.
pub fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    for (name, filename, bytes) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(
    app: &Router,
    uri: &str,
    cookies: &str,
    body: Vec<u8>,
) -> Response<Body> {
    let mut request = Request::builder().method(Method::POST).uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if !cookies.is_empty() {
        request = request.header(header::COOKIE, cookies);
    }
    app.clone()
        .oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collects the `name=value` pairs from a response's Set-Cookie headers, the
/// way a browser would echo them back.
pub fn cookies_from(response: &Response<Body>) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Creates a leaderless group and enters it, returning the session cookie
/// string and the group id.
pub async fn enter_new_group(test: &TestApp, name: &str) -> (String, uuid::Uuid) {
    let group = test.groups().create(name).await.unwrap();
    let response = get(&test.app, &format!("/groups/{}/enter", group.id), "").await;
    assert_eq!(location(&response), "/board");
    (cookies_from(&response), group.id)
}

/// Polls a condition for up to ~1s, for asserting on spawned side effects.
pub async fn wait_until<F>(mut condition: F)
where
    F: FnMut() -> bool,
{
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("condition not reached within timeout");
}
