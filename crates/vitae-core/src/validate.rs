//! # Document Validation
//!
//! Normalization and validation applied by every store before persisting.
//!
//! Normalization runs first (trim, lower-case the email), then validation
//! runs on the normalized values. All failures of a document are collected
//! and returned together in one `VitaeError::Validation`.

use crate::primitives::{EMAIL_INVALID, EMAIL_PATTERN, EMAIL_REQUIRED, NAME_REQUIRED};
use crate::{Links, NewProfile, Profile, Project, VitaeError};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid email regex"));

/// Check an already-normalized email against the basic address pattern.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Build a normalized, validated profile from create input.
///
/// Both timestamps are set to `now`.
pub fn normalize_new(input: NewProfile, now: DateTime<Utc>) -> Result<Profile, VitaeError> {
    let NewProfile {
        name,
        email,
        education,
        skills,
        projects,
        work,
        links,
    } = input;

    normalize_profile(Profile {
        name: name.unwrap_or_default(),
        email: email.unwrap_or_default(),
        education,
        skills,
        projects,
        work,
        links,
        created_at: now,
        updated_at: now,
    })
}

/// Normalize and validate a complete profile document.
///
/// Timestamps are left untouched.
pub fn normalize_profile(mut profile: Profile) -> Result<Profile, VitaeError> {
    let mut errors = Vec::new();

    profile.name = profile.name.trim().to_string();
    if profile.name.is_empty() {
        errors.push(NAME_REQUIRED.to_string());
    }

    profile.email = profile.email.trim().to_lowercase();
    if profile.email.is_empty() {
        errors.push(EMAIL_REQUIRED.to_string());
    } else if !is_valid_email(&profile.email) {
        errors.push(EMAIL_INVALID.to_string());
    }

    trim_entries(&mut profile.education);
    trim_entries(&mut profile.skills);
    trim_entries(&mut profile.work);

    for (index, project) in profile.projects.iter_mut().enumerate() {
        normalize_project(project, index + 1, &mut errors);
    }

    trim_links(&mut profile.links);

    if errors.is_empty() {
        Ok(profile)
    } else {
        Err(VitaeError::Validation(errors))
    }
}

/// `position` is 1-based, as shown in messages.
fn normalize_project(project: &mut Project, position: usize, errors: &mut Vec<String>) {
    project.title = project.title.trim().to_string();
    if project.title.is_empty() {
        errors.push(format!("Project {}: title is required", position));
    }
    // The description keeps its formatting; it only has to say something.
    if project.description.trim().is_empty() {
        errors.push(format!("Project {}: description is required", position));
    }
    trim_entries(&mut project.links);
}

fn trim_entries(entries: &mut [String]) {
    for entry in entries.iter_mut() {
        let trimmed = entry.trim();
        if trimmed.len() != entry.len() {
            *entry = trimmed.to_string();
        }
    }
}

fn trim_links(links: &mut Links) {
    for link in [&mut links.github, &mut links.linkedin, &mut links.portfolio] {
        if let Some(url) = link.as_mut() {
            *url = url.trim().to_string();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(err: VitaeError) -> Vec<String> {
        match err {
            VitaeError::Validation(messages) => messages,
            other => vec![format!("not a validation error: {other:?}")],
        }
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let profile =
            normalize_new(NewProfile::new("  Alex  ", "  Alex@Example.COM "), Utc::now())
                .expect("valid");
        assert_eq!(profile.name, "Alex");
        assert_eq!(profile.email, "alex@example.com");
    }

    #[test]
    fn missing_required_fields_reported_together() {
        let err = normalize_new(NewProfile::default(), Utc::now()).expect_err("invalid");
        let messages = messages(err);
        assert!(messages.contains(&NAME_REQUIRED.to_string()));
        assert!(messages.contains(&EMAIL_REQUIRED.to_string()));
    }

    #[test]
    fn whitespace_name_is_missing() {
        let err = normalize_new(NewProfile::new("   ", "a@b.co"), Utc::now()).expect_err("invalid");
        assert_eq!(messages(err), vec![NAME_REQUIRED.to_string()]);
    }

    #[test]
    fn malformed_emails_rejected() {
        for email in ["alex", "alex@example", "@example.com", "al ex@example.com"] {
            let err = normalize_new(NewProfile::new("Alex", email), Utc::now())
                .expect_err("invalid email");
            assert_eq!(messages(err), vec![EMAIL_INVALID.to_string()], "{email}");
        }
    }

    #[test]
    fn list_entries_and_links_trimmed() {
        let mut input = NewProfile::new("Alex", "alex@example.com");
        input.skills = vec!["  Rust ".to_string(), "Go".to_string()];
        input.education = vec!["\tBSc\n".to_string()];
        input.links.github = Some(" https://github.com/alex ".to_string());
        input.projects =
            vec![Project::new(" Kv ", "store").with_links(vec![" https://kv.dev ".to_string()])];

        let profile = normalize_new(input, Utc::now()).expect("valid");
        assert_eq!(profile.skills, vec!["Rust".to_string(), "Go".to_string()]);
        assert_eq!(profile.education, vec!["BSc".to_string()]);
        assert_eq!(profile.links.github.as_deref(), Some("https://github.com/alex"));
        assert_eq!(profile.projects[0].title, "Kv");
        assert_eq!(profile.projects[0].links, vec!["https://kv.dev".to_string()]);
    }

    #[test]
    fn project_requires_title_and_description() {
        let mut input = NewProfile::new("Alex", "alex@example.com");
        input.projects = vec![Project::new("Ok", "fine"), Project::new(" ", "")];

        let messages = messages(normalize_new(input, Utc::now()).expect_err("invalid"));
        assert_eq!(
            messages,
            vec![
                "Project 2: title is required".to_string(),
                "Project 2: description is required".to_string(),
            ]
        );
    }

    #[test]
    fn description_formatting_preserved() {
        let mut input = NewProfile::new("Alex", "alex@example.com");
        input.projects = vec![Project::new("Kv", "  indented\n")];

        let profile = normalize_new(input, Utc::now()).expect("valid");
        assert_eq!(profile.projects[0].description, "  indented\n");
    }
}
