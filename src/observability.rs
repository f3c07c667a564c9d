//! Logging setup and request counters

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber
///
/// `RUST_LOG` selects the filter; `info` is used when it is unset or invalid.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    requests_rejected: AtomicU64,
    extractions_succeeded: AtomicU64,
    extractions_failed: AtomicU64,
    upstream_succeeded: AtomicU64,
    upstream_failed: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "requests_rejected", "Metric incremented");
    }

    pub fn extraction_succeeded(&self) {
        self.extractions_succeeded.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "extractions_succeeded", "Metric incremented");
    }

    pub fn extraction_failed(&self) {
        self.extractions_failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "extractions_failed", "Metric incremented");
    }

    pub fn upstream_succeeded(&self) {
        self.upstream_succeeded.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "upstream_succeeded", "Metric incremented");
    }

    pub fn upstream_failed(&self) {
        self.upstream_failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "upstream_failed", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            extractions_succeeded: self.extractions_succeeded.load(Ordering::Relaxed),
            extractions_failed: self.extractions_failed.load(Ordering::Relaxed),
            upstream_succeeded: self.upstream_succeeded.load(Ordering::Relaxed),
            upstream_failed: self.upstream_failed.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests_rejected: u64,
    pub extractions_succeeded: u64,
    pub extractions_failed: u64,
    pub upstream_succeeded: u64,
    pub upstream_failed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_increments() {
        let metrics = Metrics::new();
        metrics.request_rejected();
        metrics.extraction_succeeded();
        metrics.extraction_succeeded();
        metrics.upstream_failed();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests_rejected, 1);
        assert_eq!(snapshot.extractions_succeeded, 2);
        assert_eq!(snapshot.extractions_failed, 0);
        assert_eq!(snapshot.upstream_succeeded, 0);
        assert_eq!(snapshot.upstream_failed, 1);
    }
}
