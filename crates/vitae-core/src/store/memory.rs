//! In-memory profile store.

use super::ProfileStore;
use crate::primitives::{PROFILE_EXISTS, PROFILE_NOT_FOUND};
use crate::validate::{normalize_new, normalize_profile};
use crate::{NewProfile, Profile, VitaeError};
use chrono::Utc;

/// Volatile store holding at most one profile.
///
/// The `Option` slot is the singleton: a second create finds it occupied.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profile: Option<Profile>,
}

impl MemoryProfileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn find_profile(&self) -> Result<Option<Profile>, VitaeError> {
        Ok(self.profile.clone())
    }

    fn create_profile(&mut self, input: NewProfile) -> Result<Profile, VitaeError> {
        if self.profile.is_some() {
            return Err(VitaeError::Conflict(PROFILE_EXISTS.to_string()));
        }
        let profile = normalize_new(input, Utc::now())?;
        self.profile = Some(profile.clone());
        Ok(profile)
    }

    fn save_profile(&mut self, profile: Profile) -> Result<Profile, VitaeError> {
        let Some(stored) = self.profile.as_ref() else {
            return Err(VitaeError::NotFound(PROFILE_NOT_FOUND.to_string()));
        };

        let mut profile = normalize_profile(profile)?;
        profile.created_at = stored.created_at;
        profile.updated_at = Utc::now();
        self.profile = Some(profile.clone());
        Ok(profile)
    }

    fn clear(&mut self) -> Result<(), VitaeError> {
        self.profile = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_finds_nothing() {
        let store = MemoryProfileStore::new();
        assert_eq!(store.find_profile().expect("find"), None);
    }

    #[test]
    fn second_create_conflicts() {
        let mut store = MemoryProfileStore::new();
        store
            .create_profile(NewProfile::new("Alex", "alex@example.com"))
            .expect("first");

        let err = store
            .create_profile(NewProfile::new("Sam", "sam@example.com"))
            .expect_err("second");
        assert!(matches!(err, VitaeError::Conflict(_)));
        assert_eq!(
            store.find_profile().expect("find").map(|p| p.name),
            Some("Alex".to_string())
        );
    }

    #[test]
    fn invalid_create_leaves_store_empty() {
        let mut store = MemoryProfileStore::new();
        let err = store
            .create_profile(NewProfile::new("Alex", "not-an-email"))
            .expect_err("invalid");
        assert!(matches!(err, VitaeError::Validation(_)));
        assert_eq!(store.find_profile().expect("find"), None);
    }

    #[test]
    fn save_requires_existing_profile() {
        let mut store = MemoryProfileStore::new();
        let mut other = MemoryProfileStore::new();
        let profile = other
            .create_profile(NewProfile::new("Alex", "alex@example.com"))
            .expect("create");

        let err = store.save_profile(profile).expect_err("nothing stored");
        assert!(matches!(err, VitaeError::NotFound(_)));
    }

    #[test]
    fn save_keeps_created_at_and_refreshes_updated_at() {
        let mut store = MemoryProfileStore::new();
        let created = store
            .create_profile(NewProfile::new("Alex", "alex@example.com"))
            .expect("create");

        let mut edited = created.clone();
        edited.name = " Alex Rivera ".to_string();
        let saved = store.save_profile(edited).expect("save");

        assert_eq!(saved.name, "Alex Rivera");
        assert_eq!(saved.created_at, created.created_at);
        assert!(saved.updated_at >= created.updated_at);
    }

    #[test]
    fn clear_empties_store() {
        let mut store = MemoryProfileStore::new();
        store
            .create_profile(NewProfile::new("Alex", "alex@example.com"))
            .expect("create");
        store.clear().expect("clear");
        assert_eq!(store.find_profile().expect("find"), None);
        store.clear().expect("clear on empty");
    }
}
