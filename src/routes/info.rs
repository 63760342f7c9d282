//! Root endpoint: the process/runtime introspection snapshot.
//!
//! The static fields are captured once at startup; the root handler fills the
//! per-request fields (name parameter, remote address, inbound headers) into
//! a clone before rendering, so concurrent requests never share mutable data.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Query, State},
    http::HeaderMap,
    response::Response,
};
use serde::{Deserialize, Serialize};
use sysinfo::System;
use tracing::instrument;

use crate::config::{APP_NAME, APP_VERSION, NO_PARAMETER_NAME};
use crate::error::AppError;
use crate::response::json_pretty;
use crate::state::AppState;

/// Snapshot of process and runtime state, rendered by `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeInfo {
    /// Host name reported by the kernel.
    pub hostname: String,
    /// Process id of the server.
    pub pid: u32,
    /// Process id of the server's parent.
    pub ppid: i32,
    /// Numeric user id the server runs as.
    pub uid: u32,
    /// Name of this application.
    pub appname: String,
    /// Version of this application.
    pub version: String,
    /// Value of the name query parameter (sentinel if name was not set).
    pub param_name: String,
    /// Remote client address of the request being answered.
    pub remote_addr: String,
    /// Operating system identifier.
    pub os: String,
    /// CPU architecture identifier.
    pub arch: String,
    /// rustc version the binary was built with.
    pub runtime: String,
    /// Number of tokio worker threads.
    pub num_workers: String,
    /// Number of logical CPUs.
    pub num_cpu: String,
    /// How long this service has been up.
    pub uptime: String,
    /// Environment variables as KEY=VALUE strings.
    pub env_vars: Vec<String>,
    /// Headers received with the request being answered.
    pub headers: BTreeMap<String, Vec<String>>,
}

impl RuntimeInfo {
    /// Capture the static part of the snapshot.
    ///
    /// Called once at startup; the per-request fields stay at their empty
    /// defaults until the root handler fills them.
    pub fn capture(started_at: Instant) -> Self {
        let hostname = System::host_name().unwrap_or_else(|| {
            tracing::warn!("could not read the kernel host name");
            "#unknown#".to_string()
        });
        let num_workers = tokio::runtime::Handle::try_current()
            .map(|handle| handle.metrics().num_workers())
            .unwrap_or(0);
        let num_cpu = std::thread::available_parallelism()
            .map(usize::from)
            .unwrap_or(0);

        Self {
            hostname,
            pid: std::process::id(),
            ppid: nix::unistd::getppid().as_raw(),
            uid: nix::unistd::getuid().as_raw(),
            appname: APP_NAME.to_string(),
            version: APP_VERSION.to_string(),
            param_name: NO_PARAMETER_NAME.to_string(),
            remote_addr: String::new(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            runtime: env!("RUSTC_VERSION").to_string(),
            num_workers: num_workers.to_string(),
            num_cpu: num_cpu.to_string(),
            uptime: format!("{:?}", started_at.elapsed()),
            env_vars: std::env::vars().map(|(k, v)| format!("{k}={v}")).collect(),
            headers: BTreeMap::new(),
        }
    }
}

/// Query parameters accepted by the root endpoint.
#[derive(Debug, Deserialize)]
pub struct InfoParams {
    pub name: Option<String>,
}

/// `GET /` handler: render the runtime info snapshot.
#[instrument(name = "info::index", skip_all)]
pub async fn index(
    State(state): State<AppState>,
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
    Query(params): Query<InfoParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    tracing::debug!(method = "GET", path = "/", remote = %remote_addr, "handling request");

    let mut info = state.info.as_ref().clone();
    // An empty ?name= keeps the sentinel, only a non-empty value overrides it
    if let Some(name) = params.name.filter(|name| !name.is_empty()) {
        info.param_name = name;
    }
    info.remote_addr = remote_addr.to_string();
    info.headers = header_multimap(&headers);
    // Captured at startup but always cleared before rendering, so callers
    // never see a value. Matches the long-standing behavior of the original
    // workload; TODO: report the actual elapsed uptime here.
    info.uptime = String::new();

    let response = json_pretty(&info)?;
    tracing::info!(path = "/", remote = %remote_addr, "served runtime info");
    Ok(response)
}

fn header_multimap(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        map.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    map
}
