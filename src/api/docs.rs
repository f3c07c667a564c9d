//! Interactive API documentation
//!
//! `GET /` serves a Swagger UI page that loads the OpenAPI document from
//! `GET /openapi.json`. The document is static apart from the route prefix.

use axum::{
    Json,
    extract::State,
    http::header,
    response::IntoResponse,
};
use serde_json::{Value, json};

use super::state::AppState;

const SWAGGER_UI_VERSION: &str = "5.17.14";

/// Swagger UI page (GET /)
pub async fn docs_page(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, mime::TEXT_HTML_UTF_8.to_string())],
        render_page(&state.config.server.app_name),
    )
}

/// OpenAPI document (GET /openapi.json)
pub async fn openapi_json(State(state): State<AppState>) -> Json<Value> {
    Json(openapi_document(&state.config.server.app_name))
}

fn render_page(app_name: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{app_name} · API docs</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{
        url: "/openapi.json",
        dom_id: "#swagger-ui",
        deepLinking: true,
      }});
    }};
  </script>
</body>
</html>
"##,
        app_name = app_name,
        version = SWAGGER_UI_VERSION,
    )
}

fn error_content() -> Value {
    json!({
        "application/json": {
            "schema": { "$ref": "#/components/schemas/ErrorResponse" }
        }
    })
}

fn url_parameter(description: &str, example: &str) -> Value {
    json!({
        "in": "query",
        "name": "url",
        "required": true,
        "schema": { "type": "string" },
        "description": description,
        "example": example,
    })
}

/// OpenAPI 3.0 description of both download endpoints
pub fn openapi_document(app_name: &str) -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": format!("{app_name} · Social Media Downloader API"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Universal downloader (YouTube, TikTok, Twitter/X, Facebook, Reddit, etc.) via yt-dlp, plus a dedicated Terabox endpoint proxied to an upstream worker.",
            "contact": { "name": app_name },
        },
        "tags": [
            { "name": "Universal", "description": "All social sites via yt-dlp" },
            { "name": "Terabox", "description": "Terabox direct link generator (proxy)" },
        ],
        "paths": {
            format!("/{app_name}/download"): {
                "get": {
                    "tags": ["Universal"],
                    "summary": "Fetch video/audio info & direct format URLs from any supported platform",
                    "parameters": [url_parameter(
                        "Public video URL (YouTube, TikTok, Twitter/X, Facebook, Reddit, etc.)",
                        "https://www.youtube.com/watch?v=XXXX",
                    )],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/UniversalResponse" }
                                }
                            }
                        },
                        "400": { "description": "Missing/invalid params", "content": error_content() },
                        "500": { "description": "Extractor error", "content": error_content() },
                    }
                }
            },
            format!("/{app_name}/terabox/download"): {
                "get": {
                    "tags": ["Terabox"],
                    "summary": "Get direct Terabox file link via the upstream worker",
                    "parameters": [url_parameter(
                        "Terabox share URL",
                        "https://terabox.com/s/1kpYz6J8xalpQtoDk4DH8Aw?pwd=xxxx",
                    )],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/TeraboxResponse" }
                                }
                            }
                        },
                        "400": { "description": "Missing/invalid params", "content": error_content() },
                        "502": { "description": "Upstream (worker) error", "content": error_content() },
                    }
                }
            },
        },
        "components": {
            "schemas": {
                "Format": {
                    "type": "object",
                    "properties": {
                        "quality": { "type": "string" },
                        "ext": { "type": "string", "nullable": true },
                        "filesize": { "type": "number", "nullable": true },
                        "width": { "type": "number", "nullable": true },
                        "height": { "type": "number", "nullable": true },
                        "fps": { "type": "number", "nullable": true },
                        "acodec": { "type": "string", "nullable": true },
                        "vcodec": { "type": "string", "nullable": true },
                        "url": { "type": "string" },
                    }
                },
                "UniversalResponse": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean" },
                        "site": { "type": "string", "nullable": true },
                        "title": { "type": "string", "nullable": true },
                        "thumbnail": { "type": "string", "nullable": true },
                        "duration": { "type": "number", "nullable": true },
                        "uploader": { "type": "string", "nullable": true },
                        "formats": {
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/Format" }
                        },
                    },
                    "example": {
                        "success": true,
                        "site": "youtube",
                        "title": "Sample Video",
                        "thumbnail": "https://i.ytimg.com/vi/xxxx/maxresdefault.jpg",
                        "duration": 123,
                        "uploader": "Channel",
                        "formats": [{
                            "quality": "720p",
                            "ext": "mp4",
                            "filesize": 123456789,
                            "width": 1280,
                            "height": 720,
                            "fps": 30,
                            "acodec": "mp4a.40.2",
                            "vcodec": "avc1.64001F",
                            "url": "https://...",
                        }],
                    },
                },
                "TeraboxResponse": {
                    "type": "object",
                    "properties": {
                        "file_name": { "type": "string" },
                        "directlink": { "type": "string" },
                        "thumb": { "type": "string" },
                        "size": { "type": "string" },
                        "sizebytes": { "type": "number" },
                    },
                    "example": {
                        "file_name": "The Wandering Earth (2019) Subtitle Indonesia 720p.mp4",
                        "directlink": "https://d.terabox.app/file/....?expires=8h&region=dm",
                        "thumb": "https://dm-data.terabox.app/thumbnail/....&size=c850_u580",
                        "size": "726.66 MB",
                        "sizebytes": 761958949,
                    },
                },
                "ErrorResponse": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean", "example": false },
                        "error": { "type": "string" },
                        "detail": { "type": "string" },
                    },
                },
            }
        }
    })
}
