//! Taskboard task service: a JSON REST API over an in-memory board.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 127.0.0.1:8000
//! cargo run --bin taskboard-server
//!
//! # Custom address, with demo data
//! cargo run --bin taskboard-server -- --bind 0.0.0.0:8080 --seed
//! ```

use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use taskboard_server::api::{self, AppState};
use taskboard_server::board::Board;
use taskboard_server::config::{ServerCliArgs, ServerConfig};
use taskboard_server::sample;

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

    tracing::info!(addr = %config.bind_addr, "starting taskboard service");

    let mut board = Board::new();
    if config.seed
        && let Err(e) = sample::seed(&mut board, Utc::now())
    {
        tracing::error!(error = %e, "failed to seed sample tasks");
        std::process::exit(1);
    }
    let state = Arc::new(AppState::with_board(board, config.allowed_origins.clone()));

    match api::start_server_with_state(&config.bind_addr, state).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "task service listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "task service task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start task service");
            std::process::exit(1);
        }
    }
}
