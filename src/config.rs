//! Configuration resolution and constants.
//!
//! The listen port comes from the `PORT` environment variable (default 8080);
//! everything else is fixed at compile time: handler timings, the shutdown
//! grace period, response strings, and the default log filter. `ServerConfig`
//! is the resolved configuration passed through the server constructors.

use const_format::formatcp;
use std::net::SocketAddr;
use std::time::Duration;

// =============================================================================
// Application identity
// =============================================================================

/// Application name reported in the runtime info snapshot.
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Application version reported in the runtime info snapshot.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Network
// =============================================================================

/// TCP port used when the PORT environment variable is not set.
pub const DEFAULT_PORT: u16 = 8080;

/// Environment variable overriding the listen port (integer, 1-65535).
pub const PORT_ENV_VAR: &str = "PORT";

// =============================================================================
// Handler timing
// =============================================================================

/// Seconds the /wait endpoint sleeps before answering.
pub const SECONDS_TO_SLEEP: u64 = 3;

/// Maximum time in-flight requests get to finish during shutdown.
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Upper bound on a single request/response exchange.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(2 * 60);

// =============================================================================
// Response strings
// =============================================================================

pub const MIME_APP_JSON: &str = "application/json";
pub const CHARSET_UTF8: &str = "charset=UTF-8";

/// Content-Type sent with every JSON response.
pub const MIME_APP_JSON_UTF8: &str = formatcp!("{}; {}", MIME_APP_JSON, CHARSET_UTF8);

/// Sentinel reported when the `name` query parameter is absent.
pub const NO_PARAMETER_NAME: &str = "_NO_PARAMETER_NAME_";

/// Body sent with every 405 response.
pub const METHOD_NOT_ALLOWED_MSG: &str = "ERROR: Http method not allowed";

/// Title of the decorative 404 page.
pub const NOT_FOUND_MESSAGE: &str = "🤔 ℍ𝕞𝕞... 𝕤𝕠𝕣𝕣𝕪 :【𝟜𝟘𝟜 : ℙ𝕒𝕘𝕖 ℕ𝕠𝕥 𝔽𝕠𝕦𝕟𝕕】🕳️ 🔥";

/// Opening of every HTML page the server emits.
pub const HTML_HEADER_START: &str = r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/skeleton/2.0.4/skeleton.min.css"/>"#;

// =============================================================================
// Logging
// =============================================================================

/// Default log filter when neither --log-level nor RUST_LOG is set.
pub const DEFAULT_LOG_FILTER: &str = "podscope=debug,tower_http=info";

/// Resolved server configuration.
///
/// The listen address string, once resolved, stays immutable for the process
/// lifetime.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address in `:PORT` form.
    pub listen_addr: String,
    /// The resolved port.
    pub port: u16,
}

impl ServerConfig {
    /// Resolve the configuration from the environment.
    ///
    /// Reads `PORT` if set, falling back to [`DEFAULT_PORT`]. Fails when the
    /// value is not an integer or is outside 1-65535.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var(PORT_ENV_VAR) {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self {
            listen_addr: format!(":{port}"),
            port,
        })
    }

    /// The address the listener binds to (all interfaces).
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

// Parsed through i64 so integers that are not valid ports (0, negatives,
// >65535) report as range errors rather than parse errors.
fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let port: i64 = raw.parse()?;
    if !(1..=65535).contains(&port) {
        return Err(ConfigError::PortOutOfRange(port));
    }
    Ok(port as u16)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ENV PORT should contain a valid integer: {0}")]
    InvalidPort(#[from] std::num::ParseIntError),
    #[error("ENV PORT should contain an integer between 1 and 65535, got {0}")]
    PortOutOfRange(i64),
}
