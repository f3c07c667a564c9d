//! Client for the upstream Terabox link-resolving worker
//!
//! The worker takes a percent-encoded share URL appended to its base address
//! and answers with a JSON description of the direct download link. The body
//! is relayed untouched; this module only enforces the deadline and turns
//! failures into [`UpstreamError`]s.

use bytes::Bytes;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::TeraboxConfig;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Upstream error ({status})")]
    Status { status: u16, detail: String },

    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Transport(String),

    #[error("invalid upstream response: {0}")]
    InvalidBody(String),
}

pub type Result<T> = std::result::Result<T, UpstreamError>;

/// Upstream worker client
#[derive(Debug, Clone)]
pub struct TeraboxClient {
    client: Client,
    upstream_base: String,
    timeout: Duration,
    detail_limit: usize,
}

impl TeraboxClient {
    pub fn new(config: &TeraboxConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            upstream_base: config.upstream_base.clone(),
            timeout: config.timeout(),
            detail_limit: config.detail_limit,
        })
    }

    /// Full upstream address for a share URL
    ///
    /// Everything except ASCII alphanumerics and `-_.~` is percent-encoded.
    pub fn upstream_url(&self, share_url: &str) -> String {
        format!("{}{}", self.upstream_base, urlencoding::encode(share_url))
    }

    /// Resolves a share URL through the worker and returns its JSON verbatim
    ///
    /// The whole exchange (connect, status, body) runs under one deadline.
    pub async fn resolve(&self, share_url: &str) -> Result<Value> {
        let upstream = self.upstream_url(share_url);

        tokio::time::timeout(self.timeout, self.fetch(&upstream))
            .await
            .map_err(|_| {
                warn!(upstream = %upstream, timeout = ?self.timeout, "Upstream deadline elapsed");
                UpstreamError::Timeout(self.timeout)
            })?
    }

    async fn fetch(&self, upstream: &str) -> Result<Value> {
        debug!(upstream, "Calling upstream worker");

        let response = self.client.get(upstream).send().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout(self.timeout)
            } else {
                UpstreamError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                detail: read_detail(response, self.detail_limit).await,
            });
        }

        let body: Bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(format!("Failed to read body: {}", e)))?;

        debug!(upstream, size = body.len(), "Upstream responded");

        serde_json::from_slice(&body).map_err(|e| UpstreamError::InvalidBody(e.to_string()))
    }
}

/// Leading `limit` characters of an error body
///
/// Stops pulling chunks once enough bytes for `limit` characters have arrived.
/// Diagnostics only: read failures end the body early instead of erroring.
async fn read_detail(mut response: Response, limit: usize) -> String {
    let max_bytes = limit.saturating_mul(4);
    let mut buf = Vec::new();

    while buf.len() < max_bytes {
        match response.chunk().await {
            Ok(Some(chunk)) => buf.extend_from_slice(&chunk),
            Ok(None) => break,
            Err(e) => {
                debug!(error = %e, "Upstream error body unreadable");
                break;
            }
        }
    }

    truncate_chars(&String::from_utf8_lossy(&buf), limit)
}

/// First `limit` characters of `text`
pub fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, routing::get};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client_for(base: String, timeout_secs: u64) -> TeraboxClient {
        TeraboxClient::new(&TeraboxConfig {
            upstream_base: base,
            timeout_secs,
            detail_limit: 500,
        })
        .unwrap()
    }

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/?url=", addr)
    }

    #[test]
    fn test_upstream_url_percent_encodes() {
        let client = client_for("https://worker.example.com/?url=".to_string(), 30);

        assert_eq!(
            client.upstream_url("https://terabox.com/s/1kpYz6J8?pwd=a b&x=1"),
            "https://worker.example.com/?url=https%3A%2F%2Fterabox.com%2Fs%2F1kpYz6J8%3Fpwd%3Da%20b%26x%3D1"
        );
        assert_eq!(client.upstream_url("a-b_c.d~e"), "https://worker.example.com/?url=a-b_c.d~e");
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("rate limited", 500), "rate limited");
        assert_eq!(truncate_chars(&"x".repeat(600), 500).len(), 500);
        assert_eq!(truncate_chars("ääää", 2), "ää");
    }

    #[tokio::test]
    async fn test_resolve_relays_json() {
        let app = Router::new().route(
            "/",
            get(|| async { r#"{"file_name":"a.mp4","sizebytes":761958949}"# }),
        );
        let client = client_for(serve(app).await, 5);

        let value = client.resolve("https://terabox.com/s/xyz").await.unwrap();
        assert_eq!(value["file_name"], "a.mp4");
        assert_eq!(value["sizebytes"], 761958949);
    }

    #[tokio::test]
    async fn test_resolve_reports_status_and_detail() {
        let app = Router::new().route(
            "/",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "rate limited") }),
        );
        let client = client_for(serve(app).await, 5);

        match client.resolve("https://terabox.com/s/xyz").await {
            Err(UpstreamError::Status { status, detail }) => {
                assert_eq!(status, 503);
                assert_eq!(detail, "rate limited");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_detail_stops_reading_at_limit() {
        // Raw socket: one chunk of an error body that never finishes
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;

            let chunk = "e".repeat(4096);
            socket
                .write_all(
                    b"HTTP/1.1 503 Service Unavailable\r\ncontent-type: text/plain\r\ntransfer-encoding: chunked\r\n\r\n",
                )
                .await
                .unwrap();
            socket
                .write_all(format!("{:x}\r\n{}\r\n", chunk.len(), chunk).as_bytes())
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let client = client_for(format!("http://{}/?url=", addr), 3);

        match client.resolve("https://terabox.com/s/xyz").await {
            Err(UpstreamError::Status { status, detail }) => {
                assert_eq!(status, 503);
                assert_eq!(detail.chars().count(), 500);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_rejects_non_json_success() {
        let app = Router::new().route("/", get(|| async { "<html>oops</html>" }));
        let client = client_for(serve(app).await, 5);

        let err = client.resolve("https://terabox.com/s/xyz").await.unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidBody(_)));
    }

    #[tokio::test]
    async fn test_resolve_enforces_deadline() {
        let app = Router::new().route(
            "/",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "{}"
            }),
        );
        let client = client_for(serve(app).await, 1);

        let err = client.resolve("https://terabox.com/s/xyz").await.unwrap_err();
        assert!(matches!(err, UpstreamError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_resolve_transport_failure() {
        // Bind then drop to get a port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}/?url=", addr), 5);
        let err = client.resolve("https://terabox.com/s/xyz").await.unwrap_err();

        assert!(matches!(err, UpstreamError::Transport(_)));
        assert!(!err.to_string().is_empty());
    }
}
