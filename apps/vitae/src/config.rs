//! # Configuration
//!
//! Settings are resolved in layers, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config <file>`, or `vitae.toml` in the working directory)
//! 3. Environment variables
//! 4. Command-line flags
//!
//! ## Environment Variables
//!
//! - `VITAE_DATABASE`: connection string (`memory:`, `redb:<path>` or a path)
//! - `VITAE_HOST`, `VITAE_PORT`: listen address
//! - `VITAE_BASE_PATH`: prefix all routes (e.g. `/api`)
//! - `VITAE_CORS_ORIGINS`: comma-separated origins, or `*` for all
//!
//! The database has no default. A server started without one refuses to run.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file picked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "vitae.toml";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

pub const ENV_DATABASE: &str = "VITAE_DATABASE";
pub const ENV_HOST: &str = "VITAE_HOST";
pub const ENV_PORT: &str = "VITAE_PORT";
pub const ENV_BASE_PATH: &str = "VITAE_BASE_PATH";
pub const ENV_CORS_ORIGINS: &str = "VITAE_CORS_ORIGINS";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "No database configured. Set VITAE_DATABASE, pass --database, or add `database` to the config file"
    )]
    MissingDatabase,

    #[error("Cannot read config file {path:?}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Invalid config file {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

// =============================================================================
// CORS POLICY
// =============================================================================

/// Which browser origins may call the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Local development origins only.
    #[default]
    Localhost,
    /// Any origin.
    Any,
    /// An explicit list.
    Origins(Vec<String>),
}

impl CorsPolicy {
    fn from_list<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let origins: Vec<String> = origins
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if origins.iter().any(|o| o == "*") {
            Self::Any
        } else if origins.is_empty() {
            Self::Localhost
        } else {
            Self::Origins(origins)
        }
    }

    /// Parse the comma-separated environment form.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Self::from_list(value.split(','))
    }
}

// =============================================================================
// FILE LAYER
// =============================================================================

/// Contents of a `vitae.toml` file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub database: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub base_path: Option<String>,
    pub cors_origins: Option<Vec<String>>,
}

impl FileConfig {
    /// Read and parse a config file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&text).map_err(|reason| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parse config text.
    pub fn parse(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }
}

// =============================================================================
// FLAG LAYER
// =============================================================================

/// Values given on the command line. They win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

// =============================================================================
// RESOLVED SETTINGS
// =============================================================================

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Connection string, if any layer provided one.
    pub database: Option<String>,
    pub host: String,
    pub port: u16,
    /// Normalized route prefix (`/api`), or `None` to serve at the root.
    pub base_path: Option<String>,
    pub cors: CorsPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            base_path: None,
            cors: CorsPolicy::default(),
        }
    }
}

impl Settings {
    /// Resolve settings from the real file system and process environment.
    ///
    /// Without an explicit `config_path`, `vitae.toml` is used when it exists.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => FileConfig::read(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    tracing::info!("Using config file {}", DEFAULT_CONFIG_FILE);
                    FileConfig::read(default_path)?
                } else {
                    FileConfig::default()
                }
            }
        };

        Self::resolve(file, |key| std::env::var(key).ok(), overrides)
    }

    /// Merge the layers. `env` looks up one environment variable.
    pub fn resolve(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        // File layer
        if let Some(database) = file.database {
            settings.database = Some(database);
        }
        if let Some(host) = file.host {
            settings.host = host;
        }
        if let Some(port) = file.port {
            settings.port = port;
        }
        if let Some(base_path) = file.base_path {
            settings.base_path = normalize_base_path(&base_path);
        }
        if let Some(origins) = file.cors_origins {
            settings.cors = CorsPolicy::from_list(origins);
        }

        // Environment layer (empty values count as unset)
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        if let Some(database) = env(ENV_DATABASE) {
            settings.database = Some(database);
        }
        if let Some(host) = env(ENV_HOST) {
            settings.host = host;
        }
        if let Some(port) = env(ENV_PORT) {
            settings.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_PORT,
                    value: port,
                })?;
        }
        if let Some(base_path) = env(ENV_BASE_PATH) {
            settings.base_path = normalize_base_path(&base_path);
        }
        if let Some(origins) = env(ENV_CORS_ORIGINS) {
            settings.cors = CorsPolicy::parse(&origins);
        }

        // Flag layer
        if let Some(database) = &overrides.database {
            settings.database = Some(database.clone());
        }
        if let Some(host) = &overrides.host {
            settings.host = host.clone();
        }
        if let Some(port) = overrides.port {
            settings.port = port;
        }

        Ok(settings)
    }

    /// The connection string, or `MissingDatabase`.
    pub fn database(&self) -> Result<&str, ConfigError> {
        self.database
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or(ConfigError::MissingDatabase)
    }

    /// `host:port` for binding.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `"api/"` → `Some("/api")`, `"/"` and `""` → `None`.
fn normalize_base_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}

// =============================================================================
// TESTS
// =============================================================================
