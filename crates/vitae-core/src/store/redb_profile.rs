//! # redb-backed Profile Storage
//!
//! A disk-backed profile store using the redb embedded database.
//!
//! redb gives us:
//! - ACID transactions
//! - Crash safety (copy-on-write B-trees)
//! - A single writer at a time, which is what makes create atomic
//!
//! ## Layout
//!
//! - `profiles`: `SINGLETON_KEY` → postcard-encoded `Profile`
//! - `email_index`: lower-cased email → `SINGLETON_KEY`
//!
//! Create checks both tables and inserts inside one write transaction, so
//! two concurrent creators (even in different processes) cannot both win.

use super::ProfileStore;
use crate::primitives::{PROFILE_EXISTS, PROFILE_NOT_FOUND, SINGLETON_KEY};
use crate::validate::{normalize_new, normalize_profile};
use crate::{NewProfile, Profile, VitaeError};
use chrono::Utc;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::{Path, PathBuf};

/// Table for the document: singleton key -> serialized Profile bytes
const PROFILES: TableDefinition<&str, &[u8]> = TableDefinition::new("profiles");

/// Table for email uniqueness: email -> singleton key
const EMAIL_INDEX: TableDefinition<&str, &str> = TableDefinition::new("email_index");

fn storage_err(e: impl std::fmt::Display) -> VitaeError {
    VitaeError::Storage(e.to_string())
}

fn encode(profile: &Profile) -> Result<Vec<u8>, VitaeError> {
    postcard::to_allocvec(profile).map_err(|e| VitaeError::Serialization(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<Profile, VitaeError> {
    postcard::from_bytes(bytes).map_err(|e| VitaeError::Serialization(e.to_string()))
}

/// A disk-backed profile store using redb.
pub struct RedbProfileStore {
    /// The redb database handle.
    db: Database,
    /// Where the database lives, for diagnostics.
    path: PathBuf,
}

impl std::fmt::Debug for RedbProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbProfileStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl RedbProfileStore {
    /// Open or create a profile database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VitaeError> {
        let path = path.as_ref().to_path_buf();
        let db = Database::create(&path).map_err(storage_err)?;

        // Initialize tables if they don't exist, so read transactions can
        // always open them.
        let write_txn = db.begin_write().map_err(storage_err)?;
        let _ = write_txn.open_table(PROFILES).map_err(storage_err)?;
        let _ = write_txn.open_table(EMAIL_INDEX).map_err(storage_err)?;
        write_txn.commit().map_err(storage_err)?;

        Ok(Self { db, path })
    }
}

impl ProfileStore for RedbProfileStore {
    fn find_profile(&self) -> Result<Option<Profile>, VitaeError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(PROFILES).map_err(storage_err)?;

        match table.get(SINGLETON_KEY).map_err(storage_err)? {
            Some(guard) => decode(guard.value()).map(Some),
            None => Ok(None),
        }
    }

    fn create_profile(&mut self, input: NewProfile) -> Result<Profile, VitaeError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        let profile = {
            let mut profiles = write_txn.open_table(PROFILES).map_err(storage_err)?;
            let mut emails = write_txn.open_table(EMAIL_INDEX).map_err(storage_err)?;

            // Occupancy wins over validation. Dropping an uncommitted
            // transaction aborts it.
            if profiles.get(SINGLETON_KEY).map_err(storage_err)?.is_some() {
                return Err(VitaeError::Conflict(PROFILE_EXISTS.to_string()));
            }

            let profile = normalize_new(input, Utc::now())?;
            let bytes = encode(&profile)?;

            if emails
                .get(profile.email.as_str())
                .map_err(storage_err)?
                .is_some()
            {
                return Err(VitaeError::DuplicateEmail);
            }

            profiles
                .insert(SINGLETON_KEY, bytes.as_slice())
                .map_err(storage_err)?;
            emails
                .insert(profile.email.as_str(), SINGLETON_KEY)
                .map_err(storage_err)?;
            profile
        };
        write_txn.commit().map_err(storage_err)?;

        Ok(profile)
    }

    fn save_profile(&mut self, profile: Profile) -> Result<Profile, VitaeError> {
        let mut profile = normalize_profile(profile)?;

        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut profiles = write_txn.open_table(PROFILES).map_err(storage_err)?;
            let mut emails = write_txn.open_table(EMAIL_INDEX).map_err(storage_err)?;

            let stored = match profiles.get(SINGLETON_KEY).map_err(storage_err)? {
                Some(guard) => decode(guard.value())?,
                None => return Err(VitaeError::NotFound(PROFILE_NOT_FOUND.to_string())),
            };

            profile.created_at = stored.created_at;
            profile.updated_at = Utc::now();

            if stored.email != profile.email {
                let taken = emails
                    .get(profile.email.as_str())
                    .map_err(storage_err)?
                    .is_some_and(|owner| owner.value() != SINGLETON_KEY);
                if taken {
                    return Err(VitaeError::DuplicateEmail);
                }
                emails
                    .remove(stored.email.as_str())
                    .map_err(storage_err)?;
                emails
                    .insert(profile.email.as_str(), SINGLETON_KEY)
                    .map_err(storage_err)?;
            }

            let bytes = encode(&profile)?;
            profiles
                .insert(SINGLETON_KEY, bytes.as_slice())
                .map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;

        Ok(profile)
    }

    fn clear(&mut self) -> Result<(), VitaeError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut profiles = write_txn.open_table(PROFILES).map_err(storage_err)?;
            let mut emails = write_txn.open_table(EMAIL_INDEX).map_err(storage_err)?;

            let stored = match profiles.remove(SINGLETON_KEY).map_err(storage_err)? {
                Some(guard) => Some(decode(guard.value())?),
                None => None,
            };
            if let Some(stored) = stored {
                emails
                    .remove(stored.email.as_str())
                    .map_err(storage_err)?;
            }
        }
        write_txn.commit().map_err(storage_err)?;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Links, Project};
    use tempfile::tempdir;

    fn sample_input() -> NewProfile {
        NewProfile {
            name: Some("Alex Rivera".to_string()),
            email: Some("Alex.Rivera@Example.com".to_string()),
            education: vec!["BSc Computer Science".to_string()],
            skills: vec!["Python".to_string(), "React".to_string()],
            projects: vec![
                Project::new("Chat", "Realtime chat in React")
                    .with_links(vec!["https://github.com/alex/chat".to_string()]),
            ],
            work: vec!["Intern - Startup".to_string()],
            links: Links {
                github: Some("https://github.com/alex".to_string()),
                linkedin: None,
                portfolio: Some("https://alex.dev".to_string()),
            },
        }
    }

    #[test]
    fn create_then_find() {
        let dir = tempdir().expect("tempdir");
        let mut store = RedbProfileStore::open(dir.path().join("vitae.redb")).expect("open");

        let created = store.create_profile(sample_input()).expect("create");
        let found = store.find_profile().expect("find").expect("present");

        assert_eq!(found, created);
        assert_eq!(found.email, "alex.rivera@example.com");
        assert_eq!(found.links.linkedin, None);
    }

    #[test]
    fn empty_database_finds_nothing() {
        let dir = tempdir().expect("tempdir");
        let store = RedbProfileStore::open(dir.path().join("vitae.redb")).expect("open");
        assert_eq!(store.find_profile().expect("find"), None);
    }

    #[test]
    fn second_create_conflicts() {
        let dir = tempdir().expect("tempdir");
        let mut store = RedbProfileStore::open(dir.path().join("vitae.redb")).expect("open");

        store.create_profile(sample_input()).expect("first");
        let err = store
            .create_profile(NewProfile::new("Sam", "sam@example.com"))
            .expect_err("second");
        assert!(matches!(err, VitaeError::Conflict(_)));
    }

    #[test]
    fn failed_create_writes_nothing() {
        let dir = tempdir().expect("tempdir");
        let mut store = RedbProfileStore::open(dir.path().join("vitae.redb")).expect("open");

        let err = store
            .create_profile(NewProfile::new("", "bad"))
            .expect_err("invalid");
        assert!(matches!(err, VitaeError::Validation(_)));
        assert_eq!(store.find_profile().expect("find"), None);

        // The store is still usable afterwards.
        store.create_profile(sample_input()).expect("create");
    }

    #[test]
    fn persistence_after_reopen() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("vitae.redb");

        let created = {
            let mut store = RedbProfileStore::open(&path).expect("open");
            store.create_profile(sample_input()).expect("create")
        };

        let mut store = RedbProfileStore::open(&path).expect("reopen");
        assert_eq!(store.find_profile().expect("find"), Some(created));

        let err = store
            .create_profile(NewProfile::new("Sam", "sam@example.com"))
            .expect_err("singleton survives reopen");
        assert!(matches!(err, VitaeError::Conflict(_)));
    }

    #[test]
    fn save_replaces_document_and_email_index() {
        let dir = tempdir().expect("tempdir");
        let mut store = RedbProfileStore::open(dir.path().join("vitae.redb")).expect("open");
        let created = store.create_profile(sample_input()).expect("create");

        let mut edited = created.clone();
        edited.email = " NEW@Example.com ".to_string();
        edited.skills = vec!["Rust".to_string()];
        let saved = store.save_profile(edited).expect("save");

        assert_eq!(saved.email, "new@example.com");
        assert_eq!(saved.created_at, created.created_at);
        assert_eq!(store.find_profile().expect("find"), Some(saved));

        // After a clear the new address is free again.
        store.clear().expect("clear");
        store
            .create_profile(NewProfile::new("Alex", "new@example.com"))
            .expect("create after clear");
    }

    #[test]
    fn save_without_profile_is_not_found() {
        let dir = tempdir().expect("tempdir");
        let mut source = RedbProfileStore::open(dir.path().join("a.redb")).expect("open");
        let profile = source.create_profile(sample_input()).expect("create");

        let mut empty = RedbProfileStore::open(dir.path().join("b.redb")).expect("open");
        let err = empty.save_profile(profile).expect_err("nothing stored");
        assert!(matches!(err, VitaeError::NotFound(_)));
    }

    #[test]
    fn save_rejects_invalid_state() {
        let dir = tempdir().expect("tempdir");
        let mut store = RedbProfileStore::open(dir.path().join("vitae.redb")).expect("open");
        let created = store.create_profile(sample_input()).expect("create");

        let mut edited = created.clone();
        edited.email = "nope".to_string();
        let err = store.save_profile(edited).expect_err("invalid");
        assert!(matches!(err, VitaeError::Validation(_)));
        assert_eq!(store.find_profile().expect("find"), Some(created));
    }

    #[test]
    fn clear_then_recreate_survives_reopen() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("vitae.redb");
        {
            let mut store = RedbProfileStore::open(&path).expect("open");
            store.create_profile(sample_input()).expect("create");
            store.clear().expect("clear");
            store
                .create_profile(NewProfile::new("Sam", "alex.rivera@example.com"))
                .expect("recreate with the freed email");
        }
        let store = RedbProfileStore::open(&path).expect("reopen");
        let found = store.find_profile().expect("find").expect("present");
        assert_eq!(found.name, "Sam");
    }

    #[test]
    fn occupied_store_conflicts_before_validation() {
        let dir = tempdir().expect("tempdir");
        let mut store = RedbProfileStore::open(dir.path().join("vitae.redb")).expect("open");
        let created = store.create_profile(sample_input()).expect("create");

        let err = store
            .create_profile(NewProfile::new("", "bad"))
            .expect_err("occupied");
        assert!(matches!(err, VitaeError::Conflict(ref m) if m == PROFILE_EXISTS));
        assert_eq!(store.find_profile().expect("find"), Some(created));
    }
}
