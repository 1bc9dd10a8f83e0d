//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use std::path::Path;
use vitae::config::Settings;
use vitae::{AppError, api, seed};
use vitae_core::{
    Profile, ProfileService, StorageBackend, VitaeError, filter_projects_by_skill, search_all,
    store::file_path, top_skills,
};

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(settings: &Settings, quiet: bool) -> Result<(), AppError> {
    let database = settings.database()?;
    let service = open_service(database)?;
    let config = api::ApiConfig::from(settings);
    let prefix = config.base_path.clone().unwrap_or_default();

    if !service.store().is_persistent() {
        tracing::warn!("Using the in-memory store; the profile is lost on shutdown");
    }

    if !quiet {
        println!("Vitae Portfolio API Starting...");
        println!();
        println!("Configuration:");
        println!("  Host:     {}", settings.host);
        println!("  Port:     {}", settings.port);
        println!("  Backend:  {}", service.store().name());
        println!("  Database: {}", database);
        println!();
        println!("Endpoints:");
        println!("  GET  {}/health     - Health check", prefix);
        println!("  GET  {}/profile    - Fetch the profile", prefix);
        println!("  POST {}/profile    - Create the profile", prefix);
        println!("  PUT  {}/profile    - Update the profile", prefix);
        println!("  GET  {}/projects   - Projects by skill (?skill=)", prefix);
        println!("  GET  {}/skills/top - Top skills (?limit=)", prefix);
        println!("  GET  {}/search     - Search (?q=)", prefix);
        println!();
        println!("Press Ctrl+C to stop");
        println!();
    }

    api::run_server(&settings.addr(), service, &config).await?;
    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Create an empty store.
pub fn cmd_init(settings: &Settings, force: bool) -> Result<(), AppError> {
    let database = settings.database()?;

    let Some(path) = file_path(database).map(Path::new) else {
        println!("In-memory store selected; nothing to initialize");
        return Ok(());
    };

    if path.exists() {
        if !force {
            return Err(VitaeError::Io(
                "Database already exists. Use --force to overwrite.".to_string(),
            )
            .into());
        }
        std::fs::remove_file(path)
            .map_err(|e| VitaeError::Io(format!("Remove '{}': {}", path.display(), e)))?;
        tracing::info!("Removed existing database {}", path.display());
    }

    let _backend = StorageBackend::connect(database)?;
    println!("Initialized new redb database at {}", path.display());
    Ok(())
}

// =============================================================================
// SEED COMMAND
// =============================================================================

/// Replace the stored profile with seed data.
pub fn cmd_seed(settings: &Settings, json_mode: bool, file: Option<&Path>) -> Result<(), AppError> {
    let input = match file {
        Some(path) => seed::load_seed_file(path)?,
        None => seed::sample_profile()?,
    };

    let mut service = open_service(settings.database()?)?;
    if service.has_profile()? {
        tracing::info!("Clearing existing profile");
    }
    let profile = service.reset_with(input)?;

    if json_mode {
        print_json(&profile);
        return Ok(());
    }

    println!("Seeded profile for {} <{}>", profile.name, profile.email);
    println!(
        "  {} skills, {} projects, {} education entries, {} work entries",
        profile.skills.len(),
        profile.projects.len(),
        profile.education.len(),
        profile.work.len()
    );
    Ok(())
}

// =============================================================================
// SHOW COMMAND
// =============================================================================

/// Print the stored profile.
pub fn cmd_show(settings: &Settings, json_mode: bool) -> Result<(), AppError> {
    let service = open_service(settings.database()?)?;
    let profile = service.get_profile()?;

    if json_mode {
        print_json(&profile);
        return Ok(());
    }

    print_profile(&profile);
    Ok(())
}

fn print_profile(profile: &Profile) {
    println!("{}", profile.name);
    println!("{}", "=".repeat(profile.name.chars().count().max(1)));
    println!("Email:   {}", profile.email);
    println!("Updated: {}", profile.updated_at.to_rfc3339());

    print_section("Skills", &[profile.skills.join(", ")]);
    print_section("Education", &profile.education);
    print_section("Work", &profile.work);

    if !profile.projects.is_empty() {
        println!();
        println!("Projects:");
        for project in &profile.projects {
            println!("  - {}: {}", project.title, project.description);
            for link in &project.links {
                println!("      {}", link);
            }
        }
    }

    let links = [
        ("GitHub", &profile.links.github),
        ("LinkedIn", &profile.links.linkedin),
        ("Portfolio", &profile.links.portfolio),
    ];
    if links.iter().any(|(_, url)| url.is_some()) {
        println!();
        println!("Links:");
        for (label, url) in links {
            if let Some(url) = url {
                println!("  {:<10} {}", label, url);
            }
        }
    }
}

fn print_section(title: &str, lines: &[String]) {
    if lines.iter().all(|line| line.is_empty()) {
        return;
    }
    println!();
    println!("{}:", title);
    for line in lines {
        println!("  {}", line);
    }
}

// =============================================================================
// QUERY COMMAND
// =============================================================================

/// Run a query against the stored profile.
pub fn cmd_query(
    settings: &Settings,
    json_mode: bool,
    query_type: &str,
    term: Option<&str>,
    limit: Option<i64>,
) -> Result<(), AppError> {
    let service = open_service(settings.database()?)?;
    let profile = service.snapshot()?;

    match query_type {
        "projects" => {
            let matched = filter_projects_by_skill(&profile, term)?;
            if json_mode {
                print_json(&matched);
                return Ok(());
            }
            println!(
                "Skill '{}': {} (listed skill: {})",
                matched.skill,
                plural(matched.projects.len(), "matching project"),
                if matched.has_skill { "yes" } else { "no" }
            );
            for project in &matched.projects {
                println!("  - {}", project.title);
            }
        }
        "skills" => {
            let top = top_skills(&profile, limit);
            if json_mode {
                print_json(&top);
                return Ok(());
            }
            println!("Top {} of {} skills:", top.skills.len(), top.total);
            for (rank, skill) in top.skills.iter().enumerate() {
                println!("  {}. {}", rank + 1, skill);
            }
        }
        "search" => {
            let results = search_all(&profile, term)?;
            if json_mode {
                print_json(&results);
                return Ok(());
            }
            println!(
                "Search '{}': {}",
                term.unwrap_or_default(),
                plural(results.total_matches(), "match")
            );
            if results.is_empty() {
                return Ok(());
            }
            print_section("Skills", &results.skills);
            let titles: Vec<String> = results.projects.iter().map(|p| p.title.clone()).collect();
            print_section("Projects", &titles);
            print_section("Education", &results.education);
            print_section("Work", &results.work);
        }
        other => {
            return Err(VitaeError::BadRequest(format!(
                "Unknown query type '{}'. Use projects, skills or search",
                other
            ))
            .into());
        }
    }

    Ok(())
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Open the store named by `database` and wrap it in a service.
pub fn open_service(database: &str) -> Result<ProfileService, VitaeError> {
    let backend = StorageBackend::connect(database)?;
    tracing::debug!("Opened {} store", backend.name());
    Ok(ProfileService::new(backend))
}

fn print_json<T: serde::Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn plural(count: usize, noun: &str) -> String {
    match (count, noun.ends_with("ch")) {
        (1, _) => format!("1 {}", noun),
        (_, true) => format!("{} {}es", count, noun),
        (_, false) => format!("{} {}s", count, noun),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vitae::config::{FileConfig, Overrides};

    fn settings_for(database: &str) -> Settings {
        let overrides = Overrides {
            database: Some(database.to_string()),
            ..Overrides::default()
        };
        Settings::resolve(FileConfig::default(), |_: &str| None, &overrides).expect("settings")
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "match"), "1 match");
        assert_eq!(plural(3, "match"), "3 matches");
        assert_eq!(plural(0, "matching project"), "0 matching projects");
    }

    #[test]
    fn init_refuses_existing_file_without_force() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vitae.redb");
        let settings = settings_for(&format!("redb:{}", path.display()));

        cmd_init(&settings, false).expect("first init");
        assert!(path.exists());
        assert!(cmd_init(&settings, false).is_err());
        cmd_init(&settings, true).expect("forced init");
    }

    #[test]
    fn seed_then_query_on_redb() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("vitae.redb");
        let settings = settings_for(&path.display().to_string());

        cmd_seed(&settings, true, None).expect("seed");
        cmd_seed(&settings, false, None).expect("reseed replaces");

        let profile = open_service(&path.display().to_string())
            .expect("open")
            .get_profile()
            .expect("profile");
        assert_eq!(profile.name, "Jordan Lee");

        cmd_query(&settings, true, "skills", None, Some(3)).expect("skills");
        cmd_query(&settings, false, "projects", Some("rust"), None).expect("projects");
        cmd_query(&settings, false, "search", Some("python"), None).expect("search");
        cmd_query(&settings, false, "search", Some("cobol"), None).expect("search without hits");
        assert!(cmd_query(&settings, false, "search", None, None).is_err());
        assert!(cmd_query(&settings, false, "graph", None, None).is_err());
    }

    #[test]
    fn show_without_profile_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = settings_for(&dir.path().join("empty.redb").display().to_string());
        let err = cmd_show(&settings, false).expect_err("no profile");
        assert!(matches!(err, AppError::Core(VitaeError::NotFound(_))));
    }

    #[test]
    fn commands_require_a_database() {
        let settings =
            Settings::resolve(FileConfig::default(), |_: &str| None, &Overrides::default())
                .expect("settings");
        assert!(cmd_show(&settings, false).is_err());
    }
}
