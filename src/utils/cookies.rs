//! Auth cookie construction and parsing.
//!
//! The two credential artifacts are transport-scoped cookies: `HttpOnly` so
//! page scripts can never read them, `SameSite=Strict` against CSRF, and
//! `Secure` when the deployment terminates TLS. The server keeps no session
//! state; the cookies are the whole session.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

/// Cookie carrying the short-lived access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Cookie carrying the long-lived refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Builds a `Set-Cookie` value for an auth cookie.
pub fn auth_cookie(name: &str, value: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{name}={value}; Max-Age={max_age_secs}; Path=/; HttpOnly; SameSite=Strict"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Builds a `Set-Cookie` value that instructs the client to discard a cookie.
pub fn expired_cookie(name: &str, secure: bool) -> String {
    auth_cookie(name, "", 0, secure)
}

/// Extracts a named cookie value from the `Cookie` request header.
///
/// Handles multiple cookies by splitting on semicolons and ignoring entries
/// other than `name`.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(|cookie_str| {
            cookie_str.split(';').find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                match (parts.next(), parts.next()) {
                    (Some(key), Some(value)) if key == name && !value.is_empty() => {
                        Some(value.to_string())
                    }
                    _ => None,
                }
            })
        })
}
