//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /{code}`  - Short link redirect (public)
//! - `GET /healthz` - Liveness probe (public)
//! - `/api/auth/*`  - Credential endpoints (public, tight rate limit)
//! - `/api/*`       - Link management (access token cookie required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **CORS** - Credentialed requests from configured origins only
//! - **Authentication** - Access token cookie on the protected subtree
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, cors, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `allowed_origins` - frontend origins permitted to make credentialed
///   cross-origin requests to `/api`
pub fn app_router(state: AppState, allowed_origins: &[String]) -> NormalizePath<Router> {
    let api_public = api::routes::public_routes().layer(rate_limit::secure_layer());

    let api_protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::layer());

    let api_router = Router::new()
        .merge(api_public)
        .merge(api_protected)
        .layer(cors::layer(allowed_origins));

    let router = Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/healthz", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
