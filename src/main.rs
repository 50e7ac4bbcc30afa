//! Wish Wall API server.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `WISHES_TABLE`: table holding the wishes (default: `wishes`)
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `3000`)
//! - `ALLOWED_ORIGIN`: CORS origin (default: `*`)
//! - `RUST_LOG`: Logging filter (default: `wish_wall=debug,tower_http=debug`)
//! - `LOG_FORMAT`: `json` for structured output

use tokio::net::TcpListener;
use tokio::signal;

use wish_wall::api::{AppState, create_router};
use wish_wall::infrastructure::logging::DEFAULT_FILTER;
use wish_wall::infrastructure::{RepositoryConfig, RepositoryFactory, ServerConfig, init_tracing};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing(DEFAULT_FILTER);

    tracing::info!("Starting Wish Wall API");

    let repository_config = match RepositoryConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    let server_config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    tracing::info!(
        storage_mode = ?repository_config.storage_mode,
        table = %repository_config.table_name,
        allowed_origin = %server_config.allowed_origin,
        "Configuration loaded"
    );

    let wish_repository = match RepositoryFactory::new(repository_config).create().await {
        Ok(repository) => {
            tracing::info!("Wish repository initialized");
            repository
        }
        Err(error) => {
            tracing::error!("Failed to initialize wish repository: {}", error);
            std::process::exit(1);
        }
    };

    let application = create_router(AppState::new(wish_repository), &server_config);

    let address = match server_config.socket_address() {
        Ok(address) => address,
        Err(error) => {
            tracing::error!(%error, "Invalid server address");
            std::process::exit(1);
        }
    };

    let listener = match TcpListener::bind(address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, "Failed to bind to address {}", address);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(address) => tracing::info!("Listening on {}", address),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    if let Err(error) = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "Server error");
        std::process::exit(1);
    }

    tracing::info!("Server shutdown complete");
}

/// Completes when SIGINT (Ctrl+C) or, on Unix, SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
