use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Extraction errors
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to start extractor '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("extractor exited with {status}")]
    Failed { status: String, stderr: String },
    #[error("extractor produced invalid output: {0}")]
    InvalidOutput(String),
    #[error("extractor timed out after {0:?}")]
    Timeout(Duration),
    #[error("extractor I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractionError {
    /// Message surfaced to API callers
    ///
    /// Prefers the tool's own diagnostics; otherwise falls back to the error
    /// description, which is never empty.
    pub fn message(&self) -> String {
        if let ExtractionError::Failed { stderr, .. } = self {
            let stderr = stderr.trim();
            if !stderr.is_empty() {
                return stderr.to_string();
            }
        }
        self.to_string()
    }
}

/// Resolves a source URL to the extractor's raw metadata document
///
/// Implementations must not interpret site-specific details; the returned
/// value is whatever the tool reported (`extractor`, `title`, `formats`, ...).
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<Value, ExtractionError>;
}
