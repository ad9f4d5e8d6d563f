use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use domain::services::{BoardNotifier, CommentGenerator};
use gateway::memory::{MemoryGateway, MemoryStorage};
use gateway::rest::RestGateway;
use gateway::storage::RestStorage;
use gateway::{BlobStorage, TableGateway};

use moim_board_api::services::{HttpCommentGenerator, HttpNotifier};
use moim_board_api::{app, config, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging
    logging::init_logging(&config.logging);

    info!("Starting Moim Board v{}", env!("CARGO_PKG_VERSION"));

    let (table_gateway, storage): (Arc<dyn TableGateway>, Arc<dyn BlobStorage>) =
        match config.backend.mode.as_str() {
            "memory" => {
                info!("Using in-memory backend (no data survives a restart)");
                (
                    Arc::new(MemoryGateway::new()),
                    Arc::new(MemoryStorage::new(&config.storage.bucket)),
                )
            }
            _ => (
                Arc::new(RestGateway::new(
                    &config.backend.url,
                    &config.backend.api_key,
                    config.backend.timeout_secs,
                )),
                Arc::new(RestStorage::new(
                    &config.backend.url,
                    &config.backend.api_key,
                    &config.storage.bucket,
                    config.backend.timeout_secs,
                )),
            ),
        };

    let notifier: Option<Arc<dyn BoardNotifier>> = if config.services.notify_url.is_empty() {
        info!("Notification dispatch disabled (services.notify_url not set)");
        None
    } else {
        Some(Arc::new(HttpNotifier::new(
            &config.services.notify_url,
            config.services.timeout_secs,
        )))
    };

    let generator: Option<Arc<dyn CommentGenerator>> = if config.services.generate_url.is_empty() {
        info!("Comment generation disabled (services.generate_url not set)");
        None
    } else {
        Some(Arc::new(HttpCommentGenerator::new(
            &config.services.generate_url,
            config.services.timeout_secs,
        )))
    };

    let addr = config.socket_addr();
    let app = app::create_app(config, table_gateway, storage, notifier, generator);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
