//! # Vitae - Portfolio API Server
//!
//! The main binary for Vitae.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for seeding, inspecting and querying the profile
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │             apps/vitae (THE BINARY)          │
//! │                                              │
//! │   ┌─────────────┐        ┌─────────────┐     │
//! │   │    CLI      │        │  HTTP API   │     │
//! │   │   (clap)    │        │   (axum)    │     │
//! │   └──────┬──────┘        └──────┬──────┘     │
//! │          └───────────┬──────────┘            │
//! │                      ▼                       │
//! │              ┌───────────────┐               │
//! │              │  vitae-core   │               │
//! │              │  (THE LOGIC)  │               │
//! │              └───────────────┘               │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Seed a store and serve it under /api
//! vitae --database redb:vitae.redb seed
//! VITAE_BASE_PATH=/api vitae --database redb:vitae.redb server --port 5000
//!
//! # CLI queries
//! vitae -D vitae.redb query -t projects --term react
//! vitae -D vitae.redb query -t skills --limit 5
//! ```

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // VITAE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("VITAE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vitae=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  __   __ ___  _____   _    ___
  \ \ / /|_ _||_   _| /_\  | __|
   \ V /  | |   | |  / _ \ | _|
    \_/  |___|  |_| /_/ \_\|___|

  Portfolio API v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
