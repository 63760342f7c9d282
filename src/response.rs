//! Response rendering helpers.
//!
//! JSON payloads are serialized pretty-printed with a fixed content type and
//! `X-Content-Type-Options: nosniff`. The HTML helpers build the decorative
//! page used by the 404 fallback.

use axum::response::{IntoResponse, Response};
use http::{header, HeaderValue, StatusCode};
use serde::Serialize;

use crate::config::{HTML_HEADER_START, MIME_APP_JSON_UTF8};
use crate::error::AppError;

/// Render a payload as a pretty-printed JSON 200 response.
///
/// A serialization failure surfaces as [`AppError::Serialize`], which the
/// caller propagates into a logged 500 with no partial body.
pub fn json_pretty<T: Serialize>(payload: &T) -> Result<Response, AppError> {
    let body = serde_json::to_string_pretty(payload)?;
    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(MIME_APP_JSON_UTF8),
            ),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        ],
        body,
    )
        .into_response())
}

fn html_header(title: &str) -> String {
    format!("{HTML_HEADER_START}<title>{title}</title></head>")
}

/// Build a full HTML page with the given title as its heading.
pub fn html_page(title: &str) -> String {
    format!(
        "{}\n<body><div class=\"container\"><h3>{}</h3></div></body></html>",
        html_header(title),
        title
    )
}
