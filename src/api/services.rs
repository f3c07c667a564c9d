use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    error::ApiError,
    models::{DownloadQuery, HealthResponse, UniversalResponse},
    state::AppState,
    utils::required_param,
};

/// Universal downloader endpoint (GET /<app>/download?url=...)
///
/// ## Flow:
/// 1. Trim and require the `url` query parameter (400 before any process is spawned)
/// 2. Run the extractor once, no retry
/// 3. Normalize the reported formats and shape the response
///
/// Extractor failures answer 500 with the tool's diagnostics as the message.
pub async fn universal_download(
    State(state): State<AppState>,
    query: Result<Query<DownloadQuery>, QueryRejection>,
) -> Result<Json<UniversalResponse>, ApiError> {
    let url = extract_url(&state, query)?;
    let request_id = Uuid::now_v7();

    info!(%request_id, url = %url, "Resolving formats");

    match state.extractor.extract(&url).await {
        Ok(raw) => {
            let response = UniversalResponse::from_info(&raw);
            state.metrics.extraction_succeeded();
            info!(
                %request_id,
                site = response.site.as_deref().unwrap_or("unknown"),
                formats = response.formats.len(),
                "Formats resolved"
            );
            Ok(Json(response))
        }
        Err(err) => {
            state.metrics.extraction_failed();
            warn!(%request_id, error = %err, "Extraction failed");
            Err(err.into())
        }
    }
}

/// Terabox proxy endpoint (GET /<app>/terabox/download?url=...)
///
/// Forwards the share URL to the upstream worker and relays its JSON
/// verbatim. Non-2xx answers become 502 with the upstream status and a
/// truncated body as `detail`; transport failures and timeouts become 502
/// with the failure message.
pub async fn terabox_download(
    State(state): State<AppState>,
    query: Result<Query<DownloadQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let url = extract_url(&state, query)?;
    let request_id = Uuid::now_v7();

    info!(%request_id, url = %url, "Proxying to upstream worker");

    match state.terabox.resolve(&url).await {
        Ok(body) => {
            state.metrics.upstream_succeeded();
            info!(%request_id, "Upstream resolved");
            Ok(Json(body))
        }
        Err(err) => {
            state.metrics.upstream_failed();
            warn!(%request_id, error = %err, "Upstream failed");
            Err(err.into())
        }
    }
}

/// Health check endpoint (GET /health)
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        name: state.config.server.app_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        metrics: state.metrics.snapshot(),
    })
}

/// A malformed query string counts as a missing parameter
fn extract_url(
    state: &AppState,
    query: Result<Query<DownloadQuery>, QueryRejection>,
) -> Result<String, ApiError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();

    required_param(query.url.as_deref(), "url").inspect_err(|_| {
        state.metrics.request_rejected();
        info!("Rejected request without url parameter");
    })
}
