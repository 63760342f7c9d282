//! HTTP server lifecycle.
//!
//! The server moves through four states: constructed, listening,
//! shutting-down, stopped. `start_server` covers the first two and blocks
//! until the last; the shutdown module turns termination signals into a
//! bounded graceful shutdown.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
