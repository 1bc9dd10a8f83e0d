//! # Vitae HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /profile` - The stored profile
//! - `POST /profile` - Create the profile (once)
//! - `PUT /profile` - Partially update the profile
//! - `GET /projects?skill=` - Projects mentioning a skill
//! - `GET /skills/top?limit=` - First N skills
//! - `GET /search?q=` - Search skills, projects, education and work
//!
//! All routes are nested under `base_path` when one is configured.

mod handlers;
mod types;

// Re-export handlers and types for integration tests (via `vitae::api::*`)
#[allow(unused_imports)]
pub use handlers::{
    create_profile_handler, get_profile_handler, health_handler, projects_handler,
    search_handler, top_skills_handler, update_profile_handler,
};
#[allow(unused_imports)]
pub use types::{
    ApiError, ErrorResponse, HealthResponse, ProfileResponse, ProjectsParams, ProjectsResponse,
    SearchParams, SearchResponse, TopSkillsParams, TopSkillsResponse,
};

use crate::config::{CorsPolicy, Settings};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::get,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use vitae_core::{MemoryProfileStore, ProfileService, StorageBackend, VitaeError};

/// Largest accepted request body (2 MiB).
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the profile service.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RwLock<ProfileService>>,
}

impl AppState {
    #[must_use]
    pub fn new(service: ProfileService) -> Self {
        Self {
            service: Arc::new(RwLock::new(service)),
        }
    }

    /// State over an empty in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(ProfileService::new(StorageBackend::InMemory(
            MemoryProfileStore::new(),
        )))
    }
}

// =============================================================================
// ROUTER CONFIGURATION
// =============================================================================

/// Router options taken from `Settings`.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Normalized prefix such as `/api`.
    pub base_path: Option<String>,
    pub cors: CorsPolicy,
}

impl From<&Settings> for ApiConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            base_path: settings.base_path.clone(),
            cors: settings.cors.clone(),
        }
    }
}

const ALLOWED_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::OPTIONS];

/// Build the CORS layer for a policy.
///
/// `Any` is logged as a warning. An origin list with no parseable entries
/// falls back to localhost.
fn build_cors_layer(policy: &CorsPolicy) -> CorsLayer {
    match policy {
        CorsPolicy::Any => {
            tracing::warn!("CORS: Allowing ALL origins. Do not use this in production");
            CorsLayer::permissive()
        }
        CorsPolicy::Origins(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => {
                        tracing::info!("CORS: Allowing origin: {}", origin);
                        Some(value)
                    }
                    Err(e) => {
                        tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                        None
                    }
                })
                .collect();

            if allowed.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed)
                    .allow_methods(ALLOWED_METHODS)
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        CorsPolicy::Localhost => build_localhost_cors(),
    }
}

/// Localhost origins used by a frontend dev server and the API itself.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:5000",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:5000",
    ]
    .into_iter()
    .filter_map(|origin| origin.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Router with default options: routes at the root, localhost CORS.
pub fn create_router(state: AppState) -> Router {
    create_router_with(state, &ApiConfig::default())
}

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner): tracing, CORS, body limit.
pub fn create_router_with(state: AppState, config: &ApiConfig) -> Router {
    let routes = Router::new()
        .route("/health", get(handlers::health_handler))
        .route(
            "/profile",
            get(handlers::get_profile_handler)
                .post(handlers::create_profile_handler)
                .put(handlers::update_profile_handler),
        )
        .route("/projects", get(handlers::projects_handler))
        .route("/skills/top", get(handlers::top_skills_handler))
        .route("/search", get(handlers::search_handler));

    let router = match config.base_path.as_deref() {
        Some(prefix) => {
            tracing::info!("Serving API under {}", prefix);
            Router::new().nest(prefix, routes)
        }
        None => routes,
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(&config.cors))
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl-C.
pub async fn run_server(
    addr: &str,
    service: ProfileService,
    config: &ApiConfig,
) -> Result<(), VitaeError> {
    let backend = service.store().name();
    let router = create_router_with(AppState::new(service), config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| VitaeError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Vitae HTTP server listening on {} ({} store)", addr, backend);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| VitaeError::Io(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
