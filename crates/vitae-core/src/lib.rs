//! # vitae-core
//!
//! The profile engine for Vitae - THE LOGIC.
//!
//! This crate owns the single portfolio document Vitae serves: one person's
//! name, contact email, education, skills, projects, work history and links.
//!
//! ## Layers
//!
//! - `types` → the document (`Profile`, `Project`, `Links`), its inputs and
//!   the error taxonomy (`VitaeError`)
//! - `validate` → trimming, email normalization, required-field checks
//! - `store` → the `ProfileStore` trait with in-memory and redb backends
//! - `service` → singleton create/update orchestration over a store
//! - `query` → stateless filtering and search over a profile snapshot
//!
//! ## Architectural Constraints
//!
//! - At most one profile exists in a store. The store enforces this
//!   atomically: the document lives under a fixed key.
//! - Queries never touch storage; they operate on a snapshot the caller fetched.
//! - NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod primitives;
pub mod query;
pub mod service;
pub mod store;
pub mod types;
pub mod validate;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Links, NewProfile, Profile, ProfileUpdate, Project, VitaeError};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use query::{
    SearchResults, SkillMatch, TopSkills, filter_projects_by_skill, require_term, search_all,
    top_skills,
};
pub use service::ProfileService;
pub use store::{MemoryProfileStore, ProfileStore, RedbProfileStore, StorageBackend};
