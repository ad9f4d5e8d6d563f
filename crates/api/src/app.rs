use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::services::{BoardNotifier, CommentGenerator};
use gateway::stores::{CommentStore, GroupStore, MemberStore, UpdateStore};
use gateway::{BlobStorage, TableGateway};

use crate::config::Config;
use crate::routes::{board, comments, groups, health, members, updates};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub groups: GroupStore,
    pub members: MemberStore,
    pub updates: UpdateStore,
    pub comments: CommentStore,
    pub storage: Arc<dyn BlobStorage>,
    pub notifier: Option<Arc<dyn BoardNotifier>>,
    pub generator: Option<Arc<dyn CommentGenerator>>,
}

/// Assembles the application over an already-constructed gateway and side
/// channels, so tests can substitute in-memory implementations.
pub fn create_app(
    config: Config,
    table_gateway: Arc<dyn TableGateway>,
    storage: Arc<dyn BlobStorage>,
    notifier: Option<Arc<dyn BoardNotifier>>,
    generator: Option<Arc<dyn CommentGenerator>>,
) -> Router {
    let request_timeout = config.server.request_timeout_secs;
    let state = AppState {
        config: Arc::new(config),
        groups: GroupStore::new(table_gateway.clone()),
        members: MemberStore::new(table_gateway.clone()),
        updates: UpdateStore::new(table_gateway.clone()),
        comments: CommentStore::new(table_gateway),
        storage,
        notifier,
        generator,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(board::index))
        .route("/groups", get(groups::groups_page).post(groups::create_group))
        .route(
            "/groups/:group_id/enter",
            get(groups::enter_page).post(groups::enter_group),
        )
        .route("/groups/:group_id/unlock", post(groups::unlock_info))
        .route("/groups/:group_id/info", post(groups::save_info))
        .route("/board", get(board::board_page))
        .route("/board/leave", post(board::leave_group))
        .route("/board/updates", post(updates::create_update))
        .route("/board/updates/:update_id", post(updates::save_update))
        .route(
            "/board/updates/:update_id/delete",
            post(updates::delete_update),
        )
        .route(
            "/board/updates/:update_id/comments",
            post(comments::create_comment),
        )
        .route("/board/comments/:comment_id", post(comments::save_comment))
        .route(
            "/board/comments/:comment_id/delete",
            post(comments::delete_comment),
        )
        .route("/board/members", post(members::create_member))
        .route(
            "/board/members/:member_id/delete",
            post(members::delete_member),
        )
        .route("/board/members/:member_id/email", post(members::save_email))
        .route("/api/health", get(health::health_check))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(request_timeout)))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
