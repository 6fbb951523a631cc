//! Serve command - runs the HTTP API

use std::net::SocketAddr;
use std::time::Duration;

use clap::Args;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router_with_state, AppState};
use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::{StorageType, UserRepositoryFactory};

/// Options that override the loaded configuration
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Storage backend (memory or postgres)
    #[arg(long, value_parser = parse_storage_type)]
    pub storage: Option<StorageType>,

    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,
}

fn parse_storage_type(s: &str) -> Result<StorageType, String> {
    s.parse().map_err(|e: crate::domain::DomainError| e.to_string())
}

/// Run the API server
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load()?;
    apply_overrides(&mut config, &args);
    logging::init_logging(&config.logging)?;

    let repository = UserRepositoryFactory::create(&config.storage).await?;
    let state = AppState::with_repository(repository);
    let app = create_router_with_state(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = build_socket_addr(&config)?;
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn apply_overrides(config: &mut AppConfig, args: &ServeArgs) {
    if let Some(storage) = args.storage {
        config.storage.backend = storage;
    }

    if let Some(port) = args.port {
        config.server.port = port;
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
