//! # Vitae CLI Module
//!
//! This module implements the CLI interface for Vitae.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `init` - Create an empty store
//! - `seed` - Replace the stored profile with seed data
//! - `show` - Print the stored profile
//! - `query` - Run a query against the stored profile

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vitae::AppError;
use vitae::config::{Overrides, Settings};

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Vitae - a single-profile developer portfolio API.
///
/// Serves one person's education, skills, projects and work history over
/// HTTP, with skill filtering and search.
#[derive(Parser, Debug)]
#[command(name = "vitae")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Connection string: "memory:", "redb:<path>" or a file path
    #[arg(short = 'D', long, global = true)]
    pub database: Option<String>,

    /// TOML config file (default: ./vitae.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Initialize a new empty store
    Init {
        /// Overwrite an existing database file
        #[arg(short, long)]
        force: bool,
    },

    /// Clear the store and insert a seed profile
    Seed {
        /// JSON file shaped like a POST /profile body (default: built-in sample)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show the stored profile
    Show,

    /// Query the stored profile
    Query {
        /// Query type (projects, skills, search)
        #[arg(short = 't', long)]
        query_type: String,

        /// Skill for `projects`, search text for `search`
        #[arg(long)]
        term: Option<String>,

        /// Number of skills for `skills`
        #[arg(short, long, allow_hyphen_values = true)]
        limit: Option<i64>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), AppError> {
    let json_mode = cli.json_mode;

    let mut overrides = Overrides {
        database: cli.database,
        ..Overrides::default()
    };
    if let Some(Commands::Server { host, port }) = &cli.command {
        overrides.host = host.clone();
        overrides.port = *port;
    }
    let settings = Settings::load(cli.config.as_deref(), &overrides)?;

    match cli.command {
        Some(Commands::Server { .. }) => cmd_server(&settings, cli.quiet).await,
        Some(Commands::Init { force }) => cmd_init(&settings, force),
        Some(Commands::Seed { file }) => cmd_seed(&settings, json_mode, file.as_deref()),
        Some(Commands::Show) | None => cmd_show(&settings, json_mode),
        Some(Commands::Query {
            query_type,
            term,
            limit,
        }) => cmd_query(&settings, json_mode, &query_type, term.as_deref(), limit),
    }
}
