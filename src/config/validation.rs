use super::models::Config;
use axum::http::HeaderValue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.app_name must be a non-empty path segment, got '{0}'")]
    InvalidAppName(String),

    #[error("extractor.binary must not be empty")]
    MissingExtractorBinary,

    #[error("Timeout must be positive: {field} = {value}")]
    InvalidTimeout { field: String, value: u64 },

    #[error("terabox.upstream_base must be an http(s) address, got '{0}'")]
    InvalidUpstreamBase(String),

    #[error("terabox.detail_limit must be positive")]
    InvalidDetailLimit,

    #[error("Invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_server(config)?;
    validate_extractor(config)?;
    validate_terabox(config)?;
    validate_cors(config)?;
    Ok(())
}

/// The app name becomes a single path segment of every download route
fn validate_server(config: &Config) -> Result<(), ValidationError> {
    let name = &config.server.app_name;

    if name.trim().is_empty() || name.contains('/') || name.contains(char::is_whitespace) {
        return Err(ValidationError::InvalidAppName(name.clone()));
    }

    Ok(())
}

fn validate_extractor(config: &Config) -> Result<(), ValidationError> {
    if config.extractor.binary.trim().is_empty() {
        return Err(ValidationError::MissingExtractorBinary);
    }

    if config.extractor.timeout_secs == Some(0) {
        return Err(ValidationError::InvalidTimeout {
            field: "extractor.timeout_secs".to_string(),
            value: 0,
        });
    }

    Ok(())
}

fn validate_terabox(config: &Config) -> Result<(), ValidationError> {
    let base = &config.terabox.upstream_base;

    if !base.starts_with("http://") && !base.starts_with("https://") {
        return Err(ValidationError::InvalidUpstreamBase(base.clone()));
    }

    if config.terabox.timeout_secs == 0 {
        return Err(ValidationError::InvalidTimeout {
            field: "terabox.timeout_secs".to_string(),
            value: 0,
        });
    }

    if config.terabox.detail_limit == 0 {
        return Err(ValidationError::InvalidDetailLimit);
    }

    Ok(())
}

/// Origins end up in response headers, so they must be valid header values
fn validate_cors(config: &Config) -> Result<(), ValidationError> {
    for origin in &config.cors.allowed_origins {
        if origin.trim().is_empty() || HeaderValue::from_str(origin).is_err() {
            return Err(ValidationError::InvalidCorsOrigin(origin.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_app_name() {
        for name in ["", "  ", "a/b", "my app"] {
            let mut config = Config::default();
            config.server.app_name = name.to_string();

            let result = validate(&config);
            assert!(
                matches!(result, Err(ValidationError::InvalidAppName(_))),
                "app name {name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_missing_extractor_binary() {
        let mut config = Config::default();
        config.extractor.binary = String::new();

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::MissingExtractorBinary)));
    }

    #[test]
    fn test_zero_timeouts() {
        let mut config = Config::default();
        config.extractor.timeout_secs = Some(0);
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidTimeout { .. })
        ));

        let mut config = Config::default();
        config.terabox.timeout_secs = 0;
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidTimeout { .. })
        ));
    }

    #[test]
    fn test_invalid_upstream_base() {
        let mut config = Config::default();
        config.terabox.upstream_base = "ftp://worker.example.com/?url=".to_string();

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::InvalidUpstreamBase(_))));
    }

    #[test]
    fn test_zero_detail_limit() {
        let mut config = Config::default();
        config.terabox.detail_limit = 0;

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::InvalidDetailLimit)));
    }

    #[test]
    fn test_invalid_cors_origin() {
        let mut config = Config::default();
        config.cors.allowed_origins = vec!["https://ok.example.com".to_string(), "bad\norigin".to_string()];

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::InvalidCorsOrigin(_))));
    }
}
