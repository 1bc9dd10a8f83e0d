//! # Property-Based Tests
//!
//! Invariants of the query engine over arbitrary profiles.

use chrono::Utc;
use proptest::collection::vec;
use proptest::prelude::*;
use vitae_core::{Links, Profile, Project, filter_projects_by_skill, search_all, top_skills};

fn profile_with(skills: Vec<String>, projects: Vec<Project>, work: Vec<String>) -> Profile {
    let now = Utc::now();
    Profile {
        name: "Prop".to_string(),
        email: "prop@example.com".to_string(),
        education: vec!["Somewhere".to_string()],
        skills,
        projects,
        work,
        links: Links::default(),
        created_at: now,
        updated_at: now,
    }
}

fn project_strategy() -> impl Strategy<Value = Project> {
    ("[a-zA-Z ]{1,12}", "[a-zA-Z ]{1,40}").prop_map(|(t, d)| Project::new(t, d))
}

/// True when `sub` appears in `full` in order (not necessarily contiguous).
fn is_subsequence<T: PartialEq>(sub: &[T], full: &[T]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|item| rest.any(|candidate| candidate == item))
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// `top_skills` always returns a prefix of the stored list.
    #[test]
    fn top_skills_is_prefix(
        skills in vec("[a-zA-Z]{1,8}", 0..20),
        limit in proptest::option::of(-5i64..30)
    ) {
        let profile = profile_with(skills.clone(), vec![], vec![]);
        let top = top_skills(&profile, limit);

        prop_assert_eq!(top.total, skills.len());
        prop_assert!(top.skills.len() <= skills.len());
        prop_assert_eq!(&top.skills[..], &skills[..top.skills.len()]);
        if limit.is_none() {
            prop_assert_eq!(top.skills.len(), skills.len());
        }
    }

    /// Filter results preserve stored order and every hit really contains the skill.
    #[test]
    fn filter_preserves_order(
        projects in vec(project_strategy(), 0..15),
        skill in "[a-zA-Z]{1,3}"
    ) {
        let profile = profile_with(vec![], projects.clone(), vec![]);
        let result = filter_projects_by_skill(&profile, Some(skill.as_str())).expect("filter");

        prop_assert!(is_subsequence(&result.projects, &projects));
        let needle = skill.to_lowercase();
        for project in &result.projects {
            prop_assert!(project.search_text().contains(&needle));
        }
    }

    /// Changing the case of the skill never changes the outcome.
    #[test]
    fn filter_ignores_case(
        skills in vec("[a-zA-Z]{1,8}", 0..10),
        projects in vec(project_strategy(), 0..10),
        skill in "[a-zA-Z]{1,4}"
    ) {
        let profile = profile_with(skills, projects, vec![]);
        let lower = filter_projects_by_skill(&profile, Some(skill.to_lowercase().as_str())).expect("lower");
        let upper = filter_projects_by_skill(&profile, Some(skill.to_uppercase().as_str())).expect("upper");

        prop_assert_eq!(lower.has_skill, upper.has_skill);
        prop_assert_eq!(lower.projects, upper.projects);
    }

    /// The search total is the sum of the four result lists, each an ordered subset.
    #[test]
    fn search_total_is_sum(
        skills in vec("[a-zA-Z]{1,8}", 0..10),
        projects in vec(project_strategy(), 0..10),
        work in vec("[a-zA-Z ]{1,20}", 0..10),
        query in "[a-zA-Z]{1,2}"
    ) {
        let profile = profile_with(skills.clone(), projects.clone(), work.clone());
        let results = search_all(&profile, Some(query.as_str())).expect("search");

        prop_assert_eq!(
            results.total_matches(),
            results.skills.len() + results.projects.len() + results.education.len() + results.work.len()
        );
        prop_assert!(is_subsequence(&results.skills, &skills));
        prop_assert!(is_subsequence(&results.projects, &projects));
        prop_assert!(is_subsequence(&results.work, &work));
    }
}
