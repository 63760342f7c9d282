//! podscope: a diagnostic HTTP server for container workloads.
//!
//! This is the application entry point. It initializes tracing, resolves the
//! listen port from the environment, captures the static runtime snapshot,
//! builds the Axum router with all routes, and runs the HTTP server until a
//! termination signal arrives.

mod config;
mod error;
mod http;
mod middleware;
mod response;
mod routes;
mod state;

use std::time::Instant;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{ServerConfig, APP_NAME, APP_VERSION, DEFAULT_LOG_FILTER};
use routes::create_router;
use state::AppState;

/// podscope: report process and runtime introspection data over HTTP
#[derive(Parser, Debug)]
#[command(name = "podscope", version, about)]
struct Args {
    /// Log level filter (e.g., "podscope=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Emit logs as JSON instead of human-readable text
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    if args.log_json {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(&log_filter))
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(&log_filter))
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Resolve configuration; a bad PORT is fatal before anything starts
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    tracing::info!(
        app = APP_NAME,
        version = APP_VERSION,
        addr = %config.listen_addr,
        "Starting HTTP server"
    );

    // Capture the static snapshot and wire the routing table before listening
    let state = AppState::new(Instant::now());
    let app = create_router(state.clone());

    if let Err(e) = http::start_server(app, &config).await {
        tracing::error!(error = %e, "server terminated unexpectedly");
        std::process::exit(1);
    }

    tracing::info!(uptime = ?state.started_at.elapsed(), "Server gracefully stopped, exiting");
    Ok(())
}
