//! # Vitae application library
//!
//! Everything the `vitae` binary is built from, exposed as a library so the
//! integration tests can drive the HTTP router directly.
//!
//! - `api` - axum router, handlers and wire types
//! - `config` - layered settings (defaults, TOML file, environment, flags)
//! - `seed` - sample and file-based seed profiles

pub mod api;
pub mod config;
pub mod seed;

use thiserror::Error;

/// Top-level error for the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Core(#[from] vitae_core::VitaeError),
}
