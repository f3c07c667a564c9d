//! API utility functions
//!
//! Pure, stateless helpers for request processing, kept apart from the
//! handlers so they can be unit tested.

use crate::api::error::ApiError;

/// Returns the trimmed, non-empty value of a required query parameter
pub fn required_param(value: Option<&str>, name: &'static str) -> Result<String, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or(ApiError::MissingParam(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_param_trims() {
        assert_eq!(
            required_param(Some("  https://youtube.com/watch?v=abc \n"), "url").unwrap(),
            "https://youtube.com/watch?v=abc"
        );
    }

    #[test]
    fn test_required_param_rejects_blank() {
        for value in [None, Some(""), Some("   "), Some("\t\n")] {
            match required_param(value, "url") {
                Err(ApiError::MissingParam(name)) => assert_eq!(name, "url"),
                other => panic!("expected MissingParam for {value:?}, got {other:?}"),
            }
        }
    }
}
