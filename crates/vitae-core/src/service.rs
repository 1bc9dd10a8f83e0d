//! # Profile Service
//!
//! Use-case layer over a `ProfileStore`.
//!
//! ## Invariants
//! - At most one profile exists. The store's atomic create reports an
//!   occupied slot as `Conflict`; the service never does read-then-insert.
//! - Updates replace only the fields present in the `ProfileUpdate` and are
//!   re-validated by the store on save. An empty update writes nothing.
//! - A missing profile is always `NotFound`, never an empty document.

use crate::primitives::{PROFILE_NOT_FOUND, PROFILE_NOT_FOUND_FOR_UPDATE};
use crate::store::{ProfileStore, StorageBackend};
use crate::validate::normalize_new;
use crate::{NewProfile, Profile, ProfileUpdate, VitaeError};
use chrono::Utc;

/// Singleton-profile service wrapping a store implementation.
#[derive(Debug, Default)]
pub struct ProfileService<S: ProfileStore = StorageBackend> {
    store: S,
}

impl<S: ProfileStore> ProfileService<S> {
    /// Creates a service using the provided store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The stored profile.
    ///
    /// # Errors
    ///
    /// `NotFound` when no profile exists.
    pub fn get_profile(&self) -> Result<Profile, VitaeError> {
        self.store
            .find_profile()?
            .ok_or_else(|| VitaeError::NotFound(PROFILE_NOT_FOUND.to_string()))
    }

    /// Snapshot for the query engine. Same contract as `get_profile`.
    pub fn snapshot(&self) -> Result<Profile, VitaeError> {
        self.get_profile()
    }

    /// Whether a profile exists.
    pub fn has_profile(&self) -> Result<bool, VitaeError> {
        Ok(self.store.find_profile()?.is_some())
    }

    /// Create the profile.
    ///
    /// # Errors
    ///
    /// `Conflict` if a profile already exists, `Validation` or
    /// `DuplicateEmail` as reported by the store.
    pub fn create_profile(&mut self, input: NewProfile) -> Result<Profile, VitaeError> {
        self.store.create_profile(input)
    }

    /// Apply a partial update to the stored profile.
    ///
    /// # Errors
    ///
    /// `NotFound` if no profile exists, `Validation` if the merged document
    /// is invalid (the stored profile is then left unchanged).
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<Profile, VitaeError> {
        let mut profile = self
            .store
            .find_profile()?
            .ok_or_else(|| VitaeError::NotFound(PROFILE_NOT_FOUND_FOR_UPDATE.to_string()))?;

        if update.is_empty() {
            return Ok(profile);
        }
        update.apply_to(&mut profile);
        self.store.save_profile(profile)
    }

    /// Replace whatever is stored with a freshly created profile.
    ///
    /// Used by seeding. Input that fails validation leaves the stored
    /// profile in place.
    pub fn reset_with(&mut self, input: NewProfile) -> Result<Profile, VitaeError> {
        normalize_new(input.clone(), Utc::now())?;
        self.store.clear()?;
        self.store.create_profile(input)
    }
}

// =============================================================================
// TESTS
// =============================================================================
