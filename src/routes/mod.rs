//! HTTP route handlers.
//!
//! The routing table is fixed: five exact paths, a 404 fallback for unknown
//! paths, and a shared 405 fallback for unsupported methods. All routes are
//! registered before the listener starts accepting connections; nothing is
//! added at runtime.
//!
//! Request tracing is enabled via middleware that generates a unique request
//! ID for each incoming request, allowing correlation of all logs within a
//! request.

pub mod info;
pub mod probe;
pub mod time;
pub mod wait;

use std::net::SocketAddr;

use axum::{
    extract::ConnectInfo,
    http::{Method, StatusCode, Uri},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::timeout::TimeoutLayer;

use crate::config::{METHOD_NOT_ALLOWED_MSG, NOT_FOUND_MESSAGE, REQUEST_TIMEOUT};
use crate::middleware::request_id_layer;
use crate::response::html_page;
use crate::state::AppState;

/// Creates the Axum router with all routes, fallbacks, and layers.
pub fn create_router(state: AppState) -> Router {
    tracing::debug!(
        paths = "/, /time, /wait, /readiness, /health",
        "registering handlers"
    );

    Router::new()
        .route("/", get(info::index))
        .route("/time", get(time::now))
        .route("/wait", get(wait::simulate))
        .route("/readiness", get(probe::readiness))
        .route("/health", get(probe::health))
        .fallback(unmatched)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        // Bounds each request/response exchange, including the /wait sleep
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}

/// Fallback for paths outside the routing table.
///
/// The method is checked before the path, like the original workload's root
/// dispatcher: non-GET requests get 405 even on unknown paths.
async fn unmatched(
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
    method: Method,
    uri: Uri,
) -> Response {
    tracing::debug!(method = %method, path = %uri.path(), remote = %remote_addr, "unmatched route");
    if method == Method::GET {
        (
            StatusCode::NOT_FOUND,
            Html(html_page(NOT_FOUND_MESSAGE)),
        )
            .into_response()
    } else {
        (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MSG).into_response()
    }
}

/// Fallback for known paths hit with an unsupported method.
async fn method_not_allowed(
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
    method: Method,
    uri: Uri,
) -> Response {
    tracing::debug!(method = %method, path = %uri.path(), remote = %remote_addr, "method not allowed");
    (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MSG).into_response()
}
