//! Task Store API
//!
//! # Environment Variables
//!
//! - `PORT`: Server port (default: `8080`)
//! - `RUST_LOG`: Logging level (e.g., `debug`, `info`, `task_store_api=debug`)

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use task_store_api::api::{AppState, create_router};
use task_store_api::config::ServerConfig;
use task_store_api::infrastructure::InMemoryTaskRepository;
use task_store_api::server::Server;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    tracing::info!("Starting Task Store API");

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    tracing::info!(port = config.port, "Server configuration loaded");

    let state = AppState::new(Arc::new(InMemoryTaskRepository::new()));
    let router = create_router(state);

    let server = Server::new(config);
    let address = server.address();
    if let Err(error) = server.run(router).await {
        tracing::error!(%error, %address, "Server error");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("task_store_api=debug,tower_http=debug,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}
