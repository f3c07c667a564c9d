use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub terabox: TeraboxConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Path prefix for the download routes (`/<app_name>/download`)
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            app_name: default_app_name(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn default_app_name() -> String {
    "revangeapi".to_string()
}

/// External extraction tool settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractorConfig {
    #[serde(default = "default_extractor_binary")]
    pub binary: String,
    /// Unset means the invocation may run as long as the tool does
    pub timeout_secs: Option<u64>,
    /// Netscape cookie file handed to the tool with `--cookies`
    pub cookies_file: Option<PathBuf>,
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl ExtractorConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            binary: default_extractor_binary(),
            timeout_secs: None,
            cookies_file: None,
            extra_args: Vec::new(),
        }
    }
}

fn default_extractor_binary() -> String {
    "yt-dlp".to_string()
}

/// Upstream worker used by the Terabox proxy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeraboxConfig {
    /// Base address; the percent-encoded share URL is appended verbatim
    #[serde(default = "default_upstream_base")]
    pub upstream_base: String,
    #[serde(default = "default_upstream_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum characters of upstream body echoed back as `detail`
    #[serde(default = "default_detail_limit")]
    pub detail_limit: usize,
}

impl TeraboxConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TeraboxConfig {
    fn default() -> Self {
        Self {
            upstream_base: default_upstream_base(),
            timeout_secs: default_upstream_timeout_secs(),
            detail_limit: default_detail_limit(),
        }
    }
}

fn default_upstream_base() -> String {
    "https://teraboxdownloderapi.revangeapi.workers.dev/?url=".to_string()
}

fn default_upstream_timeout_secs() -> u64 {
    30
}

fn default_detail_limit() -> usize {
    500
}

/// CORS configuration; an empty origin list allows any origin
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.server.app_name, "revangeapi");
        assert_eq!(config.extractor.binary, "yt-dlp");
        assert_eq!(config.extractor.timeout(), None);
        assert_eq!(config.terabox.timeout(), Duration::from_secs(30));
        assert_eq!(config.terabox.detail_limit, 500);
        assert!(config.cors.allowed_origins.is_empty());
    }
}
