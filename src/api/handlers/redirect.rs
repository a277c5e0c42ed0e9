//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Public: no authentication, no ownership check. The click
/// counter and last-visit timestamp are updated atomically in the same store
/// operation that resolves the code, then a `302 Found` is issued so clients
/// re-resolve on every visit.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve(&code).await?;

    debug!(code = %link.code, clicks = link.clicks, "redirecting");

    // axum's Redirect helpers only offer 303/307/308; this endpoint is
    // contractually a 302.
    Ok((StatusCode::FOUND, [(LOCATION, link.long_url)]))
}
