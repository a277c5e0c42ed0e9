//! API route configuration.
//!
//! Split into a public group (credential endpoints) and a protected group
//! guarded by [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler, login_handler,
    logout_handler, me_handler, refresh_handler, register_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Credential routes, reachable without an access token.
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account, set session cookies
/// - `POST /auth/login`    - Verify credentials, set session cookies
/// - `POST /auth/logout`   - Clear session cookies
/// - `POST /auth/refresh`  - Mint a new access token from the refresh cookie
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/auth/refresh", post(refresh_handler))
}

/// Routes requiring a valid access token cookie.
///
/// # Endpoints
///
/// - `GET    /auth/me`      - Current account's public view
/// - `POST   /links`        - Create a shortened link
/// - `GET    /links`        - List own links, newest first
/// - `GET    /links/{code}` - Stats for one of the caller's links
/// - `DELETE /links/{code}` - Delete one of the caller's links
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me_handler))
        .route("/links", post(create_link_handler).get(list_links_handler))
        .route(
            "/links/{code}",
            get(get_link_handler).delete(delete_link_handler),
        )
}
