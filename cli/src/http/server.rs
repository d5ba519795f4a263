//! HTTP server lifecycle.

use std::net::SocketAddr;

use axum::middleware;
use datachore_core::api::{CliError, TaskAgent};
use tokio::signal;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    middleware::{create_middleware_stack, request_logger},
    routes::create_router,
    AppState,
};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> Result<SocketAddr, CliError> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            CliError::Config(format!(
                "invalid listen address {}:{}: {e}",
                self.host, self.port
            ))
        })
    }
}

/// Serve the agent until Ctrl+C or SIGTERM.
pub async fn handle_serve(config: ServerConfig, agent: TaskAgent) -> Result<(), CliError> {
    let session_id = Uuid::new_v4().to_string();
    let state = AppState::new(session_id.clone(), agent);

    start_server(session_id, config, state).await
}

pub async fn start_server(
    session_id: String,
    config: ServerConfig,
    state: AppState,
) -> Result<(), CliError> {
    info!(
        data_root = %state.agent.paths().root.display(),
        "Starting HTTP server on {}:{} (session: {})",
        config.host,
        config.port,
        session_id
    );

    let app = create_router(state)
        .layer(middleware::from_fn(request_logger))
        .layer(create_middleware_stack());

    let addr = config.addr()?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CliError::Server(format!("failed to bind {addr}: {e}")))?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CliError::Server(e.to_string()))?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    tokio::select! {
        res = signal::ctrl_c() => {
            if let Err(e) = res {
                warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Received Ctrl+C signal");
        }
        _ = wait_for_sigterm() => {
            info!("Received SIGTERM signal");
        }
    }

    info!("Starting graceful shutdown...");
}

#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            warn!("Failed to set up SIGTERM handler: {}", e);
            std::future::pending::<()>().await
        }
    }
}

/// No SIGTERM outside unix; Ctrl+C still applies.
#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}
