//! `Taskboard` development API server.
//!
//! Serves the task REST API from memory so the board client can be run
//! and tested without the production backend.
//!
//! ```bash
//! # Default address 127.0.0.1:3000
//! cargo run --bin taskboard-server
//!
//! # Custom address
//! cargo run --bin taskboard-server -- --bind 0.0.0.0:8080
//! TASKBOARD_SERVER_ADDR=0.0.0.0:8080 cargo run --bin taskboard-server
//! ```

use clap::Parser;
use taskboard_server::config::{ServerCliArgs, ServerConfig};
use taskboard_server::server;

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, "starting taskboard api server");

    match server::start_server(&config.bind_addr).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "api server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "api server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start api server");
            std::process::exit(1);
        }
    }
}
