//! Readiness and liveness probes for container orchestration.
//!
//! Both endpoints return 200 with an empty body and perform no dependency
//! checks. They stay separate routes even though the logic is identical,
//! since orchestration tooling may probe them on different schedules.

use std::net::SocketAddr;

use axum::{extract::ConnectInfo, http::StatusCode};
use tracing::instrument;

/// `GET /readiness` handler.
#[instrument(name = "probe::readiness", skip_all)]
pub async fn readiness(ConnectInfo(remote_addr): ConnectInfo<SocketAddr>) -> StatusCode {
    tracing::debug!(method = "GET", path = "/readiness", remote = %remote_addr, "handling request");
    StatusCode::OK
}

/// `GET /health` handler.
#[instrument(name = "probe::health", skip_all)]
pub async fn health(ConnectInfo(remote_addr): ConnectInfo<SocketAddr>) -> StatusCode {
    tracing::debug!(method = "GET", path = "/health", remote = %remote_addr, "handling request");
    StatusCode::OK
}
