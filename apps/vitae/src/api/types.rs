//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API and the mapping
//! from engine errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use vitae_core::{Profile, Project, SearchResults, SkillMatch, TopSkills, VitaeError};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// PROFILE RESPONSE
// =============================================================================

/// Response carrying the whole profile document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Profile,
}

impl ProfileResponse {
    pub fn found(profile: Profile) -> Self {
        Self {
            success: true,
            message: None,
            data: profile,
        }
    }

    pub fn with_message(profile: Profile, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: profile,
        }
    }
}

// =============================================================================
// QUERY PARAMETERS
// =============================================================================

/// `GET /projects?skill=...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectsParams {
    pub skill: Option<String>,
}

/// `GET /skills/top?limit=...`
///
/// `limit` stays a string: anything that does not start with an integer is
/// treated as absent rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopSkillsParams {
    pub limit: Option<String>,
}

impl TopSkillsParams {
    /// The leading integer of `limit`, if any (`"3"`, `" -2"`, `"5abc"` → 5).
    pub fn parsed_limit(&self) -> Option<i64> {
        let raw = self.limit.as_deref()?.trim_start();
        let digits_start = usize::from(raw.starts_with(['-', '+']));
        let digits_len = raw[digits_start..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits_len == 0 {
            return None;
        }
        let number = &raw[..digits_start + digits_len];
        number.parse::<i64>().ok().or_else(|| {
            // Out of range: saturate in the direction of the sign.
            Some(if number.starts_with('-') {
                i64::MIN
            } else {
                i64::MAX
            })
        })
    }
}

/// `GET /search?q=...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

// =============================================================================
// QUERY RESPONSES
// =============================================================================

/// Projects matching a skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsResponse {
    pub success: bool,
    pub skill: String,
    pub has_skill: bool,
    pub count: usize,
    pub data: Vec<Project>,
}

impl From<SkillMatch> for ProjectsResponse {
    fn from(result: SkillMatch) -> Self {
        Self {
            success: true,
            skill: result.skill,
            has_skill: result.has_skill,
            count: result.projects.len(),
            data: result.projects,
        }
    }
}

/// Prefix of the skill list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopSkillsResponse {
    pub success: bool,
    pub total: usize,
    pub count: usize,
    pub data: Vec<String>,
}

impl From<TopSkills> for TopSkillsResponse {
    fn from(top: TopSkills) -> Self {
        Self {
            success: true,
            total: top.total,
            count: top.skills.len(),
            data: top.skills,
        }
    }
}

/// Multi-field search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub total_matches: usize,
    pub data: SearchResults,
}

impl SearchResponse {
    pub fn new(query: impl Into<String>, results: SearchResults) -> Self {
        Self {
            success: true,
            query: query.into(),
            total_matches: results.total_matches(),
            data: results,
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    /// Validation messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Raw cause of a server error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
            error: None,
        }
    }
}

/// An engine error tagged with what the handler was doing.
///
/// `action` only shows up in server errors ("Server error while fetching
/// profile"); client errors carry their own message.
#[derive(Debug)]
pub struct ApiError {
    pub error: VitaeError,
    pub action: &'static str,
}

impl ApiError {
    pub fn new(action: &'static str, error: VitaeError) -> Self {
        Self { error, action }
    }

    /// Closure form for `map_err`.
    pub fn during(action: &'static str) -> impl FnOnce(VitaeError) -> Self {
        move |error| Self::new(action, error)
    }

    pub fn status(&self) -> StatusCode {
        match &self.error {
            VitaeError::Validation(_)
            | VitaeError::Conflict(_)
            | VitaeError::DuplicateEmail
            | VitaeError::BadRequest(_) => StatusCode::BAD_REQUEST,
            VitaeError::NotFound(_) => StatusCode::NOT_FOUND,
            VitaeError::Storage(_) | VitaeError::Serialization(_) | VitaeError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn body(&self) -> ErrorResponse {
        match &self.error {
            VitaeError::Validation(messages) => ErrorResponse {
                errors: Some(messages.clone()),
                ..ErrorResponse::message("Validation error")
            },
            VitaeError::Conflict(message)
            | VitaeError::NotFound(message)
            | VitaeError::BadRequest(message) => ErrorResponse::message(message.clone()),
            VitaeError::DuplicateEmail => ErrorResponse::message(self.error.to_string()),
            VitaeError::Storage(_) | VitaeError::Serialization(_) | VitaeError::Io(_) => {
                ErrorResponse {
                    error: Some(self.error.to_string()),
                    ..ErrorResponse::message(format!("Server error while {}", self.action))
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.error.is_client_error() {
            tracing::debug!("Rejected request while {}: {}", self.action, self.error);
        } else {
            tracing::error!("Error {}: {}", self.action, self.error);
        }
        (self.status(), Json(self.body())).into_response()
    }
}
