//! # API Endpoint Handlers
//!
//! Reads take the state's read lock, create and update take the write lock.
//! Every call fetches a fresh snapshot from the store.

use super::{
    AppState,
    types::{
        ApiError, HealthResponse, ProfileResponse, ProjectsParams, ProjectsResponse,
        SearchParams, SearchResponse, TopSkillsParams, TopSkillsResponse,
    },
};
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use vitae_core::{
    NewProfile, ProfileUpdate, VitaeError, filter_projects_by_skill,
    primitives::{QUERY_REQUIRED, SKILL_REQUIRED},
    require_term, search_all, top_skills,
};

/// Body extractor result; rejections become validation errors.
type JsonBody<T> = Result<Json<T>, JsonRejection>;

fn body_or_validation<T>(body: JsonBody<T>, action: &'static str) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::new(action, VitaeError::invalid(rejection.body_text())))
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Liveness check.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// PROFILE HANDLERS
// =============================================================================

/// `GET /profile`
pub async fn get_profile_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    const ACTION: &str = "fetching profile";

    let service = state.service.read().await;
    let profile = service.get_profile().map_err(ApiError::during(ACTION))?;

    Ok((StatusCode::OK, Json(ProfileResponse::found(profile))))
}

/// `POST /profile`
pub async fn create_profile_handler(
    State(state): State<AppState>,
    body: JsonBody<NewProfile>,
) -> Result<impl IntoResponse, ApiError> {
    const ACTION: &str = "creating profile";

    let input = body_or_validation(body, ACTION)?;
    let mut service = state.service.write().await;
    let profile = service
        .create_profile(input)
        .map_err(ApiError::during(ACTION))?;

    tracing::info!("Profile created for {}", profile.email);
    Ok((
        StatusCode::CREATED,
        Json(ProfileResponse::with_message(
            profile,
            "Profile created successfully",
        )),
    ))
}

/// `PUT /profile`
pub async fn update_profile_handler(
    State(state): State<AppState>,
    body: JsonBody<ProfileUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    const ACTION: &str = "updating profile";

    let update = body_or_validation(body, ACTION)?;
    let mut service = state.service.write().await;
    let profile = service
        .update_profile(update)
        .map_err(ApiError::during(ACTION))?;

    tracing::info!("Profile updated");
    Ok((
        StatusCode::OK,
        Json(ProfileResponse::with_message(
            profile,
            "Profile updated successfully",
        )),
    ))
}

// =============================================================================
// QUERY HANDLERS
// =============================================================================

/// `GET /projects?skill=...`
pub async fn projects_handler(
    State(state): State<AppState>,
    Query(params): Query<ProjectsParams>,
) -> Result<impl IntoResponse, ApiError> {
    const ACTION: &str = "filtering projects";

    // A missing parameter is rejected before the store is touched.
    let skill = params.skill.as_deref();
    require_term(skill, SKILL_REQUIRED).map_err(ApiError::during(ACTION))?;

    let profile = state
        .service
        .read()
        .await
        .snapshot()
        .map_err(ApiError::during(ACTION))?;
    let matched = filter_projects_by_skill(&profile, skill).map_err(ApiError::during(ACTION))?;

    Ok((StatusCode::OK, Json(ProjectsResponse::from(matched))))
}

/// `GET /skills/top?limit=...`
pub async fn top_skills_handler(
    State(state): State<AppState>,
    Query(params): Query<TopSkillsParams>,
) -> Result<impl IntoResponse, ApiError> {
    const ACTION: &str = "fetching top skills";

    let profile = state
        .service
        .read()
        .await
        .snapshot()
        .map_err(ApiError::during(ACTION))?;
    let top = top_skills(&profile, params.parsed_limit());

    Ok((StatusCode::OK, Json(TopSkillsResponse::from(top))))
}

/// `GET /search?q=...`
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    const ACTION: &str = "searching";

    let query = params.q.as_deref();
    require_term(query, QUERY_REQUIRED).map_err(ApiError::during(ACTION))?;

    let profile = state
        .service
        .read()
        .await
        .snapshot()
        .map_err(ApiError::during(ACTION))?;
    let results = search_all(&profile, query).map_err(ApiError::during(ACTION))?;

    Ok((
        StatusCode::OK,
        Json(SearchResponse::new(query.unwrap_or_default(), results)),
    ))
}
