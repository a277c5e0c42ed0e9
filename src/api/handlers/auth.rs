//! Handlers for authentication endpoints.
//!
//! Register, login, and refresh emit credential artifacts as `Set-Cookie`
//! headers; logout emits clearance instructions. Cookie `Max-Age` always
//! matches the token's own expiry.

use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::AppendHeaders,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::auth::{AuthMessage, AuthResponse, LoginRequest, RegisterRequest};
use crate::api::middleware::auth::CurrentAccount;
use crate::application::services::{TokenKind, TokenPair};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::cookies::{
    ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, auth_cookie, expired_cookie, extract_cookie,
};

type SetCookies = AppendHeaders<Vec<(axum::http::HeaderName, String)>>;

/// Builds the two `Set-Cookie` headers carrying a fresh token pair.
fn session_cookies(state: &AppState, pair: &TokenPair) -> SetCookies {
    let tokens = state.auth_service.tokens();

    AppendHeaders(vec![
        (
            SET_COOKIE,
            auth_cookie(
                ACCESS_TOKEN_COOKIE,
                &pair.access_token,
                tokens.lifetime_secs(TokenKind::Access),
                state.cookie_secure,
            ),
        ),
        (
            SET_COOKIE,
            auth_cookie(
                REFRESH_TOKEN_COOKIE,
                &pair.refresh_token,
                tokens.lifetime_secs(TokenKind::Refresh),
                state.cookie_secure,
            ),
        ),
    ])
}

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Errors
///
/// Returns 400 on validation failure, 409 if the email is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (account, pair) = state
        .auth_service
        .register(&payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        session_cookies(&state, &pair),
        Json(AuthResponse {
            ok: true,
            user: (&account).into(),
        }),
    ))
}

/// Logs in to an existing account.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// Returns 401 with one generic error whether the account is unknown or the
/// password is wrong.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (account, pair) = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::OK,
        session_cookies(&state, &pair),
        Json(AuthResponse {
            ok: true,
            user: (&account).into(),
        }),
    ))
}

/// Discards the session by clearing both credential cookies.
///
/// # Endpoint
///
/// `POST /api/auth/logout`
///
/// No authentication required; safe to call any number of times.
pub async fn logout_handler(State(state): State<AppState>) -> impl IntoResponse {
    let headers = AppendHeaders(vec![
        (
            SET_COOKIE,
            expired_cookie(ACCESS_TOKEN_COOKIE, state.cookie_secure),
        ),
        (
            SET_COOKIE,
            expired_cookie(REFRESH_TOKEN_COOKIE, state.cookie_secure),
        ),
    ]);

    (
        headers,
        Json(AuthMessage {
            ok: true,
            message: "Logout successful",
        }),
    )
}

/// Returns the authenticated account's public view.
///
/// # Endpoint
///
/// `GET /api/auth/me` (access token required)
///
/// # Errors
///
/// Returns 404 if the account was removed after the token was issued.
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(CurrentAccount(account_id)): Extension<CurrentAccount>,
) -> Result<Json<AuthResponse>, AppError> {
    let account = state
        .auth_service
        .find_account(account_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found("USER_NOT_FOUND", "User not found", json!({ "id": account_id }))
        })?;

    Ok(Json(AuthResponse {
        ok: true,
        user: (&account).into(),
    }))
}

/// Mints a new access token from the refresh cookie.
///
/// # Endpoint
///
/// `POST /api/auth/refresh`
///
/// The refresh token is not rotated; only a new access cookie is set.
///
/// # Errors
///
/// Returns 401 with `NO_REFRESH_TOKEN` when the cookie is absent,
/// `REFRESH_TOKEN_EXPIRED` when past expiry (the client must log in again),
/// or `INVALID_REFRESH_TOKEN` for any other verification failure.
pub async fn refresh_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let refresh_token =
        extract_cookie(&headers, REFRESH_TOKEN_COOKIE).ok_or_else(|| {
            AppError::unauthorized("NO_REFRESH_TOKEN", "No refresh token", json!({}))
        })?;

    let access_token = state.auth_service.refresh(&refresh_token).await?;

    let set_cookie = AppendHeaders(vec![(
        SET_COOKIE,
        auth_cookie(
            ACCESS_TOKEN_COOKIE,
            &access_token,
            state
                .auth_service
                .tokens()
                .lifetime_secs(TokenKind::Access),
            state.cookie_secure,
        ),
    )]);

    Ok((
        set_cookie,
        Json(AuthMessage {
            ok: true,
            message: "Access token refreshed",
        }),
    ))
}
