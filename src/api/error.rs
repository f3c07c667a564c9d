use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use super::models::ErrorResponse;
use crate::extractor::ExtractionError;
use crate::terabox::UpstreamError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing query param: {0}")]
    MissingParam(&'static str),
    #[error("{0}")]
    Extraction(String),
    #[error("Upstream error ({status})")]
    Upstream { status: u16, detail: String },
    #[error("{0}")]
    Gateway(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParam(_) => StatusCode::BAD_REQUEST,
            ApiError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream { .. } | ApiError::Gateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn detail(&self) -> Option<String> {
        match self {
            ApiError::Upstream { detail, .. } => Some(detail.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            detail: self.detail(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ExtractionError> for ApiError {
    fn from(value: ExtractionError) -> Self {
        ApiError::Extraction(value.message())
    }
}

impl From<UpstreamError> for ApiError {
    fn from(value: UpstreamError) -> Self {
        match value {
            UpstreamError::Status { status, detail } => ApiError::Upstream { status, detail },
            other => ApiError::Gateway(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingParam("url").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Extraction("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Upstream { status: 503, detail: String::new() }.status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(ApiError::Gateway("down".into()).status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_upstream_status_keeps_detail() {
        let err = ApiError::from(UpstreamError::Status {
            status: 503,
            detail: "rate limited".to_string(),
        });

        assert_eq!(err.to_string(), "Upstream error (503)");
        assert_eq!(err.detail().as_deref(), Some("rate limited"));
    }

    #[test]
    fn test_extraction_error_uses_diagnostics() {
        let err = ApiError::from(ExtractionError::Failed {
            status: "exit status: 1".to_string(),
            stderr: "ERROR: [generic] Unsupported URL\n".to_string(),
        });

        assert_eq!(err.to_string(), "ERROR: [generic] Unsupported URL");
    }
}
