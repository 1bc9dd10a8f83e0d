//! # Core Type Definitions
//!
//! This module contains all core types for the Vitae profile engine:
//! - The stored document (`Profile`, `Project`, `Links`)
//! - Write inputs (`NewProfile`, `ProfileUpdate`, in `input`)
//! - Error types (`VitaeError`)
//!
//! ## Wire Form
//!
//! The document serializes with camelCase keys (`createdAt`, `updatedAt`),
//! which is what the frontend reads. The same derive is used for the stored
//! postcard bytes, so no field may use `skip_serializing_if`.

mod input;

pub use input::{NewProfile, ProfileUpdate};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// PROJECT
// =============================================================================

/// One piece of work shown on the portfolio.
///
/// A Project has no identity of its own. It is stored, replaced and deleted
/// only as part of its Profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Short title, trimmed, required.
    #[serde(default)]
    pub title: String,
    /// Free-text description, required.
    #[serde(default)]
    pub description: String,
    /// Repository, demo or write-up URLs.
    #[serde(default)]
    pub links: Vec<String>,
}

impl Project {
    /// Create a project without links.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            links: Vec::new(),
        }
    }

    /// Attach links, replacing any present.
    #[must_use]
    pub fn with_links(mut self, links: Vec<String>) -> Self {
        self.links = links;
        self
    }

    /// Lower-cased `"{title} {description}"`, the text skill filters match against.
    #[must_use]
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }
}

// =============================================================================
// LINKS
// =============================================================================

/// External profile links. URLs are trimmed but otherwise unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
}

// =============================================================================
// PROFILE
// =============================================================================

/// The single stored portfolio document.
///
/// Instances that come out of a store are always normalized: `name` and
/// `email` are trimmed, `email` is lower-case, list entries are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub education: Vec<String>,
    /// Stored in priority order; "top skills" is a prefix of this list.
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub work: Vec<String>,
    pub links: Links,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Vitae engine.
///
/// The first five variants are domain outcomes the API reports to callers
/// as client errors. The rest are unexpected failures.
#[derive(Debug, Error)]
pub enum VitaeError {
    /// One or more fields are missing or malformed.
    #[error("Validation error: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// The singleton invariant would be violated.
    #[error("{0}")]
    Conflict(String),

    /// The email uniqueness index already holds this address.
    #[error("Email already exists")]
    DuplicateEmail,

    /// No profile exists.
    #[error("{0}")]
    NotFound(String),

    /// A required query parameter is missing or empty.
    #[error("{0}")]
    BadRequest(String),

    /// The storage engine failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A file could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),
}

impl VitaeError {
    /// Single-message validation failure.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    /// Whether this is a caller mistake rather than a system failure.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::Conflict(_)
                | Self::DuplicateEmail
                | Self::NotFound(_)
                | Self::BadRequest(_)
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
