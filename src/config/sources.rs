use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "REVANGEAPI_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/revangeapi.toml";
const ENV_PREFIX: &str = "REVANGEAPI";
const ENV_SEPARATOR: &str = "__";
const PORT_ENV_VAR: &str = "PORT";

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables
/// 5. `PORT` (highest priority, port only)
pub fn load() -> Result<Config, ConfigError> {
    // .env may carry REVANGEAPI_CONFIG itself, so it goes first
    let _ = dotenvy::dotenv();

    let config_path = env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    load_layers(config_path)
}

/// Same as [`load`] but with an explicit file location
pub fn load_with_path(config_path: PathBuf) -> Result<Config, ConfigError> {
    // Load .env file if it exists (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    load_layers(config_path)
}

/// File, process environment, then `PORT`; `.env` is already loaded
fn load_layers(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut config = load_file_and_env(config_path)?;

    let port = env::var(PORT_ENV_VAR).ok();
    apply_port(&mut config, port.as_deref())?;

    Ok(config)
}

/// Applies the platform-provided `PORT` value to the bind address
///
/// Hosting platforms hand out the port through a bare `PORT` variable, so it
/// wins over everything else. Blank values are ignored.
pub fn apply_port(config: &mut Config, port: Option<&str>) -> Result<(), ConfigError> {
    let Some(raw) = port.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(());
    };

    let port: u16 = raw
        .parse()
        .map_err(|_| ConfigError::Message(format!("invalid PORT value: {raw}")))?;

    config.server.bind_addr.set_port(port);
    Ok(())
}

/// TOML file plus `REVANGEAPI__*` variables, without `.env` or `PORT`
///
/// Useful for testing with custom config files.
pub fn load_file_and_env(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    // Start with defaults (handled by struct Default implementations)
    // Add TOML file if it exists (optional)
    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // REVANGEAPI__TERABOX__TIMEOUT_SECS -> terabox.timeout_secs
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize()
}
