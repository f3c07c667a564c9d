//! Configuration management for revangeapi
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables
//! 4. The bare `PORT` variable (listening port only)
//!
//! # Usage
//!
//! ```no_run
//! use revangeapi::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Server listening on: {}", config.server.bind_addr);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `REVANGEAPI__<section>__<key>`
//!
//! Examples:
//! - `REVANGEAPI__SERVER__APP_NAME=downloader`
//! - `REVANGEAPI__EXTRACTOR__BINARY=/usr/local/bin/yt-dlp`
//! - `REVANGEAPI__TERABOX__UPSTREAM_BASE=https://worker.example.com/?url=`
//! - `PORT=8080`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/revangeapi.toml`.
//! This can be overridden using the `REVANGEAPI_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

// Re-export public types
pub use models::{Config, CorsConfig, ExtractorConfig, ServerConfig, TeraboxConfig};
pub use sources::apply_port;
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. `PORT`
    /// 2. Environment variables (`REVANGEAPI__*`)
    /// 3. TOML file (default: `config/revangeapi.toml`)
    /// 4. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file is malformed
    /// - `PORT` is not a valid port number
    /// - Validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration with an explicit file path, still honoring the
    /// environment and `PORT`
    pub fn load_with_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_with_path(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load and validate a specific file plus `REVANGEAPI__*` variables only
    ///
    /// Skips `.env` and `PORT`. Useful for testing with custom configuration files.
    pub fn load_file_and_env(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_file_and_env(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Prefix shared by the download routes, e.g. `/revangeapi`
    pub fn route_prefix(&self) -> String {
        format!("/{}", self.server.app_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
app_name = "socialdl"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_file_and_env(config_path).unwrap();
        assert_eq!(config.server.app_name, "socialdl");
        assert_eq!(config.route_prefix(), "/socialdl");
    }

    #[test]
    fn test_validation_catches_bad_upstream() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[terabox]
upstream_base = "worker.example.com/?url="
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let result = Config::load_file_and_env(config_path);
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::InvalidUpstreamBase(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_load_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[terabox]\ntimeout_secs = \"soon\"\n").unwrap();

        let result = Config::load_file_and_env(config_path);
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
