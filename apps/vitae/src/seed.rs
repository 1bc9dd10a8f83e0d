//! # Seed Data
//!
//! Profiles used by `vitae seed`. The built-in sample is compiled into the
//! binary; a JSON file in the same shape as a `POST /profile` body can be
//! used instead.

use std::path::Path;
use vitae_core::{NewProfile, VitaeError};

/// Largest seed file accepted (1 MB).
const MAX_SEED_FILE_SIZE: u64 = 1024 * 1024;

const SAMPLE_PROFILE: &str = include_str!("../data/seed.json");

/// The built-in sample profile.
pub fn sample_profile() -> Result<NewProfile, VitaeError> {
    parse_seed(SAMPLE_PROFILE.as_bytes())
}

/// Load a seed profile from a JSON file.
pub fn load_seed_file(path: &Path) -> Result<NewProfile, VitaeError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| VitaeError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;

    if !metadata.is_file() {
        return Err(VitaeError::Io(format!(
            "'{}' is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > MAX_SEED_FILE_SIZE {
        return Err(VitaeError::Io(format!(
            "Seed file size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_SEED_FILE_SIZE
        )));
    }

    let contents = std::fs::read(path)
        .map_err(|e| VitaeError::Io(format!("Read '{}': {}", path.display(), e)))?;
    parse_seed(&contents)
}

fn parse_seed(bytes: &[u8]) -> Result<NewProfile, VitaeError> {
    serde_json::from_slice(bytes).map_err(|e| VitaeError::Serialization(e.to_string()))
}
