//! Simulated-latency endpoint.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::ConnectInfo,
    response::{IntoResponse, Response},
};
use http::{header, HeaderValue};
use tracing::instrument;

use crate::config::{MIME_APP_JSON_UTF8, SECONDS_TO_SLEEP};

/// `GET /wait` handler: sleep for the fixed delay, then report it.
///
/// The sleep suspends only the task serving this request; other in-flight
/// requests keep making progress.
#[instrument(name = "wait::simulate", skip_all)]
pub async fn simulate(ConnectInfo(remote_addr): ConnectInfo<SocketAddr>) -> Response {
    tracing::debug!(
        method = "GET",
        path = "/wait",
        remote = %remote_addr,
        seconds = SECONDS_TO_SLEEP,
        "handling request"
    );

    tokio::time::sleep(Duration::from_secs(SECONDS_TO_SLEEP)).await;
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static(MIME_APP_JSON_UTF8),
        )],
        format!(r#"{{"waited":"{SECONDS_TO_SLEEP} seconds"}}"#),
    )
        .into_response()
}
