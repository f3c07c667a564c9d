//! `yt-dlp` backed extractor

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use super::traits::{ExtractionError, Extractor};
use crate::config::ExtractorConfig;

/// Flags applied to every invocation: one consolidated JSON document, no
/// certificate checks, no warnings, free formats preferred on ties.
const BASE_ARGS: &[&str] = &[
    "--dump-single-json",
    "--no-check-certificates",
    "--no-warnings",
    "--prefer-free-formats",
];

/// Runs the `yt-dlp` binary once per request
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    binary: String,
    extra_args: Vec<String>,
    cookies_file: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl YtDlpExtractor {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            extra_args: Vec::new(),
            cookies_file: None,
            timeout: None,
        }
    }

    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(config.binary.clone())
            .with_extra_args(config.extra_args.clone())
            .with_cookies_file(config.cookies_file.clone())
            .with_timeout(config.timeout())
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn with_cookies_file(mut self, path: Option<PathBuf>) -> Self {
        self.cookies_file = path;
        self
    }

    /// `None` leaves the invocation unbounded
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Arguments for one invocation
    ///
    /// The URL always comes last, after `--`, so caller input is never parsed
    /// as an option.
    pub fn build_args(&self, url: &str) -> Vec<String> {
        let mut args = self.extra_args.clone();
        args.extend(BASE_ARGS.iter().map(|arg| arg.to_string()));

        if let Some(path) = &self.cookies_file {
            args.push("--cookies".to_string());
            args.push(path.display().to_string());
        }

        args.push("--".to_string());
        args.push(url.to_string());
        args
    }

    /// Parses the tool's stdout into a metadata object
    ///
    /// The whole output is tried first; when the tool printed more than one
    /// document, the last non-empty line wins.
    pub fn parse_output(stdout: &[u8]) -> Result<Value, ExtractionError> {
        let text = String::from_utf8_lossy(stdout);
        let text = text.trim();

        if text.is_empty() {
            return Err(ExtractionError::InvalidOutput("empty output".to_string()));
        }

        let value = match serde_json::from_str::<Value>(text) {
            Ok(value) => value,
            Err(err) => text
                .lines()
                .rev()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .and_then(|line| serde_json::from_str::<Value>(line).ok())
                .ok_or_else(|| ExtractionError::InvalidOutput(err.to_string()))?,
        };

        if !value.is_object() {
            return Err(ExtractionError::InvalidOutput(
                "expected a JSON object".to_string(),
            ));
        }

        Ok(value)
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    async fn extract(&self, url: &str) -> Result<Value, ExtractionError> {
        let args = self.build_args(url);
        debug!(binary = %self.binary, url, "Running extractor");

        let child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExtractionError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        // Dropping the wait future on timeout drops the child, which kills it
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| {
                    warn!(url, timeout = ?limit, "Extractor timed out");
                    ExtractionError::Timeout(limit)
                })??,
            None => child.wait_with_output().await?,
        };

        if !output.status.success() {
            return Err(ExtractionError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Self::parse_output(&output.stdout)
    }
}
