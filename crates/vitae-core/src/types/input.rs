//! Write inputs for the profile document.
//!
//! `NewProfile` is what a create request carries; `ProfileUpdate` is what an
//! update request carries. Neither is trusted: stores normalize and validate
//! everything before it is persisted.

use super::{Links, Profile, Project};
use serde::{Deserialize, Serialize};

/// Payload for creating the profile.
///
/// `name` and `email` are optional at the type level so that a missing field
/// is reported as a validation message instead of a decode failure. Unknown
/// keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub education: Vec<String>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub work: Vec<String>,
    pub links: Links,
}

impl NewProfile {
    /// Minimal input with just the two required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            ..Self::default()
        }
    }
}

/// Payload for updating the profile.
///
/// Each present field replaces the stored field wholesale; lists are never
/// merged element-wise. Absent and `null` fields leave the stored value alone.
/// Keys outside this set are rejected at decode time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub education: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
    pub projects: Option<Vec<Project>>,
    pub work: Option<Vec<String>>,
    pub links: Option<Links>,
}

impl ProfileUpdate {
    /// True when the update carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply every present field onto `profile`.
    ///
    /// The result is not validated here; the store re-validates on save.
    pub fn apply_to(self, profile: &mut Profile) {
        let Self {
            name,
            email,
            education,
            skills,
            projects,
            work,
            links,
        } = self;

        if let Some(name) = name {
            profile.name = name;
        }
        if let Some(email) = email {
            profile.email = email;
        }
        if let Some(education) = education {
            profile.education = education;
        }
        if let Some(skills) = skills {
            profile.skills = skills;
        }
        if let Some(projects) = projects {
            profile.projects = projects;
        }
        if let Some(work) = work {
            profile.work = work;
        }
        if let Some(links) = links {
            profile.links = links;
        }
    }
}
