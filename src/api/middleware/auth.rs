//! Access token authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::cookies::{ACCESS_TOKEN_COOKIE, extract_cookie};

/// Account id of the caller, resolved from the access token.
///
/// Inserted into request extensions by [`layer`]; handlers behind the
/// middleware receive it via `Extension(CurrentAccount(id))` instead of
/// re-parsing cookies themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentAccount(pub i64);

/// Authenticates requests using the `access_token` cookie.
///
/// # Authentication Flow
///
/// 1. Read the `access_token` cookie from the `Cookie` header
/// 2. Verify the token signature, expiry, and kind
/// 3. Insert [`CurrentAccount`] into request extensions
/// 4. Continue to next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` with:
/// - `NO_TOKEN` if the cookie is missing
/// - `TOKEN_EXPIRED` if the token is past its expiry
/// - `INVALID_TOKEN` for any other verification failure
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/api/links", get(list_links_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_cookie(req.headers(), ACCESS_TOKEN_COOKIE).ok_or_else(|| {
        AppError::unauthorized("NO_TOKEN", "No access token provided", json!({}))
    })?;

    let claims = st.auth_service.verify_access(&token)?;

    req.extensions_mut().insert(CurrentAccount(claims.sub));

    Ok(next.run(req).await)
}
