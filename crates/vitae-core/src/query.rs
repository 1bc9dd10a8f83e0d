//! # Query Module
//!
//! Stateless views over a profile snapshot.
//!
//! - `filter_projects_by_skill`: projects whose title or description mention a skill
//! - `top_skills`: a prefix of the priority-ordered skill list
//! - `search_all`: substring search across skills, projects, education and work
//!
//! All matching is case-insensitive substring matching. Results keep the
//! order of the stored document. Nothing here touches storage: callers fetch
//! the snapshot (and report a missing profile) before calling in.

use crate::primitives::{QUERY_REQUIRED, SKILL_REQUIRED};
use crate::{Profile, Project, VitaeError};
use serde::{Deserialize, Serialize};

/// Result of a skill filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatch {
    /// The skill as the caller spelled it.
    pub skill: String,
    /// Whether any entry of `profile.skills` contains the skill.
    pub has_skill: bool,
    /// Matching projects, in stored order.
    pub projects: Vec<Project>,
}

/// A prefix of the skill list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSkills {
    /// Number of skills on the profile.
    pub total: usize,
    pub skills: Vec<String>,
}

/// Per-field matches of a multi-field search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub education: Vec<String>,
    pub work: Vec<String>,
}

impl SearchResults {
    /// Sum of matches over all four fields.
    #[must_use]
    pub fn total_matches(&self) -> usize {
        self.skills.len() + self.projects.len() + self.education.len() + self.work.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_matches() == 0
    }
}

/// Lower-case a required term, rejecting absent or empty input.
///
/// # Errors
///
/// `BadRequest` carrying `message` if `term` is absent or empty.
pub fn require_term(term: Option<&str>, message: &str) -> Result<String, VitaeError> {
    match term {
        Some(term) if !term.is_empty() => Ok(term.to_lowercase()),
        _ => Err(VitaeError::BadRequest(message.to_string())),
    }
}

fn matching_entries(entries: &[String], needle: &str) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| entry.to_lowercase().contains(needle))
        .cloned()
        .collect()
}

/// Projects whose `"{title} {description}"` contains `skill`.
///
/// `has_skill` is computed independently from the profile's skill list.
///
/// # Errors
///
/// `BadRequest` if `skill` is absent or empty.
pub fn filter_projects_by_skill(
    profile: &Profile,
    skill: Option<&str>,
) -> Result<SkillMatch, VitaeError> {
    let needle = require_term(skill, SKILL_REQUIRED)?;

    let projects = profile
        .projects
        .iter()
        .filter(|project| project.search_text().contains(&needle))
        .cloned()
        .collect();

    let has_skill = profile
        .skills
        .iter()
        .any(|s| s.to_lowercase().contains(&needle));

    Ok(SkillMatch {
        skill: skill.unwrap_or_default().to_string(),
        has_skill,
        projects,
    })
}

/// The first `limit` skills in stored order.
///
/// An absent limit returns every skill. A present limit is clamped to
/// `[0, total]`, so zero and negative limits return nothing.
pub fn top_skills(profile: &Profile, limit: Option<i64>) -> TopSkills {
    let total = profile.skills.len();
    let take = match limit {
        None => total,
        Some(limit) => usize::try_from(limit.max(0)).unwrap_or(usize::MAX).min(total),
    };

    TopSkills {
        total,
        skills: profile.skills[..take].to_vec(),
    }
}

/// Case-insensitive substring search over skills, projects, education and work.
///
/// A project matches when its title OR its description contains the query.
///
/// # Errors
///
/// `BadRequest` if `query` is absent or empty.
pub fn search_all(profile: &Profile, query: Option<&str>) -> Result<SearchResults, VitaeError> {
    let needle = require_term(query, QUERY_REQUIRED)?;

    let projects = profile
        .projects
        .iter()
        .filter(|project| {
            project.title.to_lowercase().contains(&needle)
                || project.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    Ok(SearchResults {
        skills: matching_entries(&profile.skills, &needle),
        projects,
        education: matching_entries(&profile.education, &needle),
        work: matching_entries(&profile.work, &needle),
    })
}

// =============================================================================
// TESTS
// =============================================================================
