//! # Profile Store
//!
//! Persistence for the single profile document.
//!
//! This module implements the `ProfileStore` trait for two backends:
//! - `MemoryProfileStore`: volatile, used by tests and `memory:` deployments
//! - `RedbProfileStore`: disk-backed, ACID, one redb file
//!
//! `StorageBackend` wraps either one and is what the service runs on.

mod memory;
mod redb_profile;

pub use memory::MemoryProfileStore;
pub use redb_profile::RedbProfileStore;

use crate::{NewProfile, Profile, VitaeError};

// =============================================================================
// PROFILESTORE TRAIT
// =============================================================================

/// Storage contract for the singleton profile.
///
/// Every write normalizes and validates the document before persisting it.
/// Implementations address the document by `primitives::SINGLETON_KEY` only.
pub trait ProfileStore {
    /// Fetch the profile, if one exists.
    fn find_profile(&self) -> Result<Option<Profile>, VitaeError>;

    /// Insert the profile.
    ///
    /// The occupancy check and the insert are one atomic step. Fails with
    /// `Conflict` when a profile already exists, `DuplicateEmail` when the
    /// email index collides and `Validation` when the input is malformed.
    /// Sets `created_at` and `updated_at`.
    fn create_profile(&mut self, input: NewProfile) -> Result<Profile, VitaeError>;

    /// Persist a mutated profile over the stored one.
    ///
    /// Re-validates and refreshes `updated_at`. Fails with `NotFound` when
    /// there is nothing stored to overwrite.
    fn save_profile(&mut self, profile: Profile) -> Result<Profile, VitaeError>;

    /// Remove the stored profile. A no-op on an empty store.
    fn clear(&mut self) -> Result<(), VitaeError>;
}

// =============================================================================
// STORAGE BACKEND
// =============================================================================

/// Storage backend selected by a connection string.
#[derive(Debug)]
pub enum StorageBackend {
    /// In-memory document (fast, volatile).
    InMemory(MemoryProfileStore),
    /// Disk-backed document using redb (ACID, persistent).
    Persistent(RedbProfileStore),
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::InMemory(MemoryProfileStore::new())
    }
}

impl StorageBackend {
    /// Open the backend named by a connection string.
    ///
    /// - `memory:` → in-memory store
    /// - `redb:<path>` → redb file at `<path>`
    /// - anything else → treated as a redb file path
    pub fn connect(connection: &str) -> Result<Self, VitaeError> {
        let connection = connection.trim();
        if connection.is_empty() {
            return Err(VitaeError::Io("Empty connection string".to_string()));
        }

        match file_path(connection) {
            None => Ok(Self::InMemory(MemoryProfileStore::new())),
            Some("") => Err(VitaeError::Io(format!(
                "Connection string '{}' names no file",
                connection
            ))),
            Some(path) => Ok(Self::Persistent(RedbProfileStore::open(path)?)),
        }
    }

    /// Check if using persistent storage.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::Persistent(_))
    }

    /// Short backend label for logs and CLI output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InMemory(_) => "memory",
            Self::Persistent(_) => "redb",
        }
    }
}

/// The redb file a connection string names, or `None` for `memory:`.
///
/// `redb:<path>` and `redb://<path>` strip the scheme; anything else is
/// taken as a path.
#[must_use]
pub fn file_path(connection: &str) -> Option<&str> {
    let connection = connection.trim();
    if connection == "memory:" || connection == "memory://" {
        return None;
    }
    Some(
        connection
            .strip_prefix("redb://")
            .or_else(|| connection.strip_prefix("redb:"))
            .unwrap_or(connection),
    )
}

impl ProfileStore for StorageBackend {
    fn find_profile(&self) -> Result<Option<Profile>, VitaeError> {
        match self {
            Self::InMemory(store) => store.find_profile(),
            Self::Persistent(store) => store.find_profile(),
        }
    }

    fn create_profile(&mut self, input: NewProfile) -> Result<Profile, VitaeError> {
        match self {
            Self::InMemory(store) => store.create_profile(input),
            Self::Persistent(store) => store.create_profile(input),
        }
    }

    fn save_profile(&mut self, profile: Profile) -> Result<Profile, VitaeError> {
        match self {
            Self::InMemory(store) => store.save_profile(profile),
            Self::Persistent(store) => store.save_profile(profile),
        }
    }

    fn clear(&mut self) -> Result<(), VitaeError> {
        match self {
            Self::InMemory(store) => store.clear(),
            Self::Persistent(store) => store.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn connect_memory() {
        let backend = StorageBackend::connect("memory:").expect("connect");
        assert!(!backend.is_persistent());
        assert_eq!(backend.name(), "memory");
    }

    #[test]
    fn connect_redb_prefixed_and_bare() {
        let dir = tempdir().expect("tempdir");

        let prefixed = dir.path().join("a.redb");
        let backend =
            StorageBackend::connect(&format!("redb:{}", prefixed.display())).expect("connect");
        assert!(backend.is_persistent());
        assert!(prefixed.exists());

        let bare = dir.path().join("b.redb");
        let backend = StorageBackend::connect(&bare.display().to_string()).expect("connect");
        assert!(backend.is_persistent());
        assert!(bare.exists());
    }

    #[test]
    fn file_path_strips_scheme() {
        assert_eq!(file_path("memory:"), None);
        assert_eq!(file_path("redb://data/p.redb"), Some("data/p.redb"));
        assert_eq!(file_path("redb:p.redb"), Some("p.redb"));
        assert_eq!(file_path(" p.redb "), Some("p.redb"));
    }

    #[test]
    fn connect_rejects_empty() {
        assert!(StorageBackend::connect("  ").is_err());
        assert!(StorageBackend::connect("redb:").is_err());
    }
}
