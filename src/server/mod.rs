// HTTP surface: router, shared state and the listen loop

pub mod handlers;

use std::sync::Arc;

use axum::routing::{any, get, post};
use axum::Router;
use thiserror::Error;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::config::{AppConfig, ConfigError};
use crate::feedback::FeedbackSink;
use crate::resolver::Resolver;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// State shared by every request; read-only after startup
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub feedback: FeedbackSink,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            resolver: Arc::new(Resolver::from_config(config)?),
            feedback: FeedbackSink::new(config.feedback.log_file.clone()),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/download", any(handlers::download))
        .route(
            "/api/feedback",
            post(handlers::feedback).fallback(handlers::method_not_allowed),
        )
        .route("/healthz", get(handlers::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(config: &AppConfig) -> Result<(), ServerError> {
    let state = AppState::from_config(config)?;
    info!(
        providers = ?state.resolver.provider_names(),
        timeout_seconds = config.network.timeout_seconds,
        "provider chain ready"
    );

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.server.bind.clone(),
            source,
        })?;
    info!(addr = %config.server.bind, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to install Ctrl+C handler");
    }
    info!("shutting down");
}
