//! API models for the revangeapi download endpoints.
//!
//! - `GET /<app>/download?url=...` answers with a [`UniversalResponse`]
//! - `GET /<app>/terabox/download?url=...` relays the worker's JSON verbatim
//! - every failure answers with an [`ErrorResponse`]
//!
//! # Universal response
//!
//! ```json
//! {
//!   "success": true,
//!   "site": "youtube",
//!   "title": "Sample Video",
//!   "thumbnail": "https://i.ytimg.com/vi/xxxx/maxresdefault.jpg",
//!   "duration": 123,
//!   "uploader": "Channel",
//!   "formats": [
//!     {
//!       "quality": "720p",
//!       "ext": "mp4",
//!       "filesize": 123456789,
//!       "width": 1280,
//!       "height": 720,
//!       "fps": 30,
//!       "acodec": "mp4a.40.2",
//!       "vcodec": "avc1.64001F",
//!       "url": "https://..."
//!     }
//!   ]
//! }
//! ```
//!
//! Optional metadata is always present as a key and becomes `null` when the
//! extractor did not report it. A `duration` of `0` stays `0`.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::formats::{FormatDescriptor, normalize_formats};
use crate::observability::MetricsSnapshot;

/// Query string accepted by both download endpoints
#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UniversalResponse {
    pub success: bool,
    pub site: Option<String>,
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<Number>,
    pub uploader: Option<String>,
    pub formats: Vec<FormatDescriptor>,
}

impl UniversalResponse {
    /// Shapes the extractor's raw metadata document
    pub fn from_info(info: &Value) -> Self {
        Self {
            success: true,
            site: non_empty_str(info, "extractor"),
            title: non_empty_str(info, "title"),
            thumbnail: non_empty_str(info, "thumbnail"),
            duration: match info.get("duration") {
                Some(Value::Number(n)) => Some(n.clone()),
                _ => None,
            },
            uploader: non_empty_str(info, "uploader"),
            formats: normalize_formats(info),
        }
    }
}

fn non_empty_str(info: &Value, key: &str) -> Option<String> {
    info.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub name: String,
    pub version: String,
    pub metrics: MetricsSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_info_maps_metadata() {
        let info = json!({
            "extractor": "youtube",
            "title": "Sample Video",
            "thumbnail": "https://i.ytimg.com/vi/abc/maxresdefault.jpg",
            "duration": 123,
            "uploader": "Channel",
            "formats": [
                {"format_id": "18", "height": 360, "url": "https://a"},
                {"format_id": "22", "height": 720, "url": "https://b"},
            ],
        });

        let response = UniversalResponse::from_info(&info);
        assert!(response.success);
        assert_eq!(response.site.as_deref(), Some("youtube"));
        assert_eq!(response.title.as_deref(), Some("Sample Video"));
        assert_eq!(response.duration, Some(123.into()));
        assert_eq!(response.uploader.as_deref(), Some("Channel"));
        assert_eq!(response.formats[0].quality, "22");
    }

    #[test]
    fn test_zero_duration_is_kept() {
        let response = UniversalResponse::from_info(&json!({"duration": 0}));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["duration"], json!(0));
    }

    #[test]
    fn test_missing_metadata_serializes_as_null() {
        let response = UniversalResponse::from_info(&json!({"title": ""}));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({
                "success": true,
                "site": null,
                "title": null,
                "thumbnail": null,
                "duration": null,
                "uploader": null,
                "formats": [],
            })
        );
    }

    #[test]
    fn test_error_response_omits_missing_detail() {
        let body = ErrorResponse {
            success: false,
            error: "Missing query param: url".to_string(),
            detail: None,
        };

        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"success":false,"error":"Missing query param: url"}"#
        );
    }
}
