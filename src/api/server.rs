use std::net::SocketAddr;

use axum::{Router, http::HeaderValue, routing::get};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use super::{
    docs::{docs_page, openapi_json},
    services::{health, terabox_download, universal_download},
    state::AppState,
};
use crate::config::{Config, CorsConfig};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Builds the full router: download routes under the app prefix, docs at `/`
pub fn build_router(state: AppState) -> Router {
    let prefix = state.config.route_prefix();
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route(&format!("{prefix}/download"), get(universal_download))
        .route(&format!("{prefix}/terabox/download"), get(terabox_download))
        .route("/", get(docs_page))
        .route("/openapi.json", get(openapi_json))
        .route("/health", get(health))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Any origin unless an explicit list is configured
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        info!(count = origins.len(), "CORS restricted to configured origins");
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub async fn run(config: Config, address: Option<SocketAddr>) -> Result<(), AnyError> {
    let address = address.unwrap_or(config.server.bind_addr);
    let prefix = config.route_prefix();

    if config.extractor.timeout().is_none() {
        warn!("extractor.timeout_secs is unset; extractor runs are unbounded");
    }

    let state = AppState::from_config(config)
        .map_err(|e| format!("Failed to build upstream client: {}", e))?;
    let app = build_router(state);

    let listener = TcpListener::bind(address).await?;
    info!(%address, "revangeapi listening");
    info!("Docs:      GET /");
    info!("Universal: GET {prefix}/download?url=...");
    info!("Terabox:   GET {prefix}/terabox/download?url=...");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
