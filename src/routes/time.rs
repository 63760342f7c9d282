//! Current-time endpoint.

use std::net::SocketAddr;

use axum::{
    extract::ConnectInfo,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use http::{header, HeaderValue};
use tracing::instrument;

use crate::config::MIME_APP_JSON_UTF8;

/// `GET /time` handler: the current UTC time as RFC3339.
#[instrument(name = "time::now", skip_all)]
pub async fn now(ConnectInfo(remote_addr): ConnectInfo<SocketAddr>) -> Response {
    tracing::debug!(method = "GET", path = "/time", remote = %remote_addr, "handling request");

    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static(MIME_APP_JSON_UTF8),
        )],
        format!(r#"{{"time":"{now}"}}"#),
    )
        .into_response()
}
