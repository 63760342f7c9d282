//! Shared application state for request handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::routes::info::RuntimeInfo;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the static part of the runtime info snapshot, captured once at
/// startup. Per-request fields (remote address, headers, name parameter) are
/// filled into a clone by the root handler on every response.
#[derive(Clone)]
pub struct AppState {
    pub info: Arc<RuntimeInfo>,
    pub started_at: Instant,
}

impl AppState {
    /// Captures the static runtime snapshot against the given start instant.
    pub fn new(started_at: Instant) -> Self {
        Self {
            info: Arc::new(RuntimeInfo::capture(started_at)),
            started_at,
        }
    }
}
