mod common;

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::{Router, middleware};
use axum_test::TestServer;
use serde_json::json;
use shortlink::api::middleware::auth;
use shortlink::api::routes::{protected_routes, public_routes};
use shortlink::application::services::TokenKind;
use sqlx::PgPool;

/// Build a test server with the full `/api` auth surface, minus rate limiting.
fn make_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);

    let api = Router::new().merge(public_routes()).merge(
        protected_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
    );

    let app = Router::new().nest("/api", api).with_state(state);
    TestServer::new(app).unwrap()
}

fn set_cookie_values(response: &axum_test::TestResponse) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

// ─── Register ────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_register_creates_account_and_session(pool: PgPool) {
    let server = make_server(pool);

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": "alice@example.com", "password": "sup3r-s3cret" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["ok"], true);
    assert_eq!(body["user"]["email"], "alice@example.com");

    let cookies = set_cookie_values(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().any(|c| c.starts_with("access_token=")));
    assert!(cookies.iter().any(|c| c.starts_with("refresh_token=")));
    for cookie in &cookies {
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
    }
}

#[sqlx::test]
async fn test_register_lowercases_email(pool: PgPool) {
    let server = make_server(pool);

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": "Bob@Example.COM", "password": "sup3r-s3cret" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(
        response.json::<serde_json::Value>()["user"]["email"],
        "bob@example.com"
    );
}

#[sqlx::test]
async fn test_register_duplicate_email_conflict(pool: PgPool) {
    common::seed_account(&pool, "taken@example.com").await;

    let server = make_server(pool);
    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": "taken@example.com", "password": "sup3r-s3cret" }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);
    assert_eq!(response.json::<serde_json::Value>()["code"], "USER_EXISTS");
}

#[sqlx::test]
async fn test_register_invalid_email_rejected(pool: PgPool) {
    let server = make_server(pool);

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": "not-an-email", "password": "sup3r-s3cret" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<serde_json::Value>()["code"], "VALIDATION");
}

#[sqlx::test]
async fn test_register_short_password_rejected(pool: PgPool) {
    let server = make_server(pool);

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": "carol@example.com", "password": "short" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<serde_json::Value>()["code"], "VALIDATION");
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_login_success(pool: PgPool) {
    common::seed_account(&pool, "dave@example.com").await;

    let server = make_server(pool);
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "dave@example.com", "password": common::TEST_PASSWORD }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["ok"], true);
    assert_eq!(body["user"]["email"], "dave@example.com");
    assert_eq!(set_cookie_values(&response).len(), 2);
}

#[sqlx::test]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    common::seed_account(&pool, "erin@example.com").await;

    let server = make_server(pool);

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "email": "erin@example.com", "password": "wrong-password" }))
        .await;
    let unknown_email = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ghost@example.com", "password": common::TEST_PASSWORD }))
        .await;

    wrong_password.assert_status_unauthorized();
    unknown_email.assert_status_unauthorized();

    // Same status and same body either way, so a caller cannot probe for
    // registered emails.
    assert_eq!(
        wrong_password.json::<serde_json::Value>(),
        unknown_email.json::<serde_json::Value>()
    );
    assert_eq!(
        wrong_password.json::<serde_json::Value>()["code"],
        "INVALID_CREDENTIALS"
    );
}

// ─── Me ──────────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_me_requires_access_cookie(pool: PgPool) {
    let server = make_server(pool);

    let response = server.get("/api/auth/me").await;

    response.assert_status_unauthorized();
    assert_eq!(response.json::<serde_json::Value>()["code"], "NO_TOKEN");
}

#[sqlx::test]
async fn test_me_returns_current_account(pool: PgPool) {
    let id = common::seed_account(&pool, "frank@example.com").await;

    let server = make_server(pool);
    let response = server
        .get("/api/auth/me")
        .add_header(COOKIE, common::access_cookie_for(id))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["user"]["id"], id);
    assert_eq!(body["user"]["email"], "frank@example.com");
}

#[sqlx::test]
async fn test_me_rejects_refresh_token_in_access_slot(pool: PgPool) {
    let id = common::seed_account(&pool, "grace@example.com").await;
    let refresh = common::test_token_service()
        .issue(id, TokenKind::Refresh)
        .unwrap();

    let server = make_server(pool);
    let response = server
        .get("/api/auth/me")
        .add_header(COOKIE, format!("access_token={refresh}"))
        .await;

    response.assert_status_unauthorized();
    assert_eq!(response.json::<serde_json::Value>()["code"], "INVALID_TOKEN");
}

#[sqlx::test]
async fn test_register_then_me_with_saved_cookies(pool: PgPool) {
    let mut server = make_server(pool);
    server.save_cookies();

    server
        .post("/api/auth/register")
        .json(&json!({ "email": "heidi@example.com", "password": "sup3r-s3cret" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server.get("/api/auth/me").await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["user"]["email"],
        "heidi@example.com"
    );
}

// ─── Refresh ─────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_refresh_without_cookie_rejected(pool: PgPool) {
    let server = make_server(pool);

    let response = server.post("/api/auth/refresh").await;

    response.assert_status_unauthorized();
    assert_eq!(
        response.json::<serde_json::Value>()["code"],
        "NO_REFRESH_TOKEN"
    );
}

#[sqlx::test]
async fn test_refresh_mints_new_access_cookie(pool: PgPool) {
    let id = common::seed_account(&pool, "ivan@example.com").await;

    let server = make_server(pool);
    let response = server
        .post("/api/auth/refresh")
        .add_header(COOKIE, common::refresh_cookie_for(id))
        .await;

    response.assert_status_ok();

    let cookies = set_cookie_values(&response);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("access_token="));
}

#[sqlx::test]
async fn test_refresh_rejects_access_token_in_refresh_slot(pool: PgPool) {
    let id = common::seed_account(&pool, "judy@example.com").await;
    let access = common::test_token_service()
        .issue(id, TokenKind::Access)
        .unwrap();

    let server = make_server(pool);
    let response = server
        .post("/api/auth/refresh")
        .add_header(COOKIE, format!("refresh_token={access}"))
        .await;

    response.assert_status_unauthorized();
    assert_eq!(
        response.json::<serde_json::Value>()["code"],
        "INVALID_REFRESH_TOKEN"
    );
}

#[sqlx::test]
async fn test_refresh_for_deleted_account_rejected(pool: PgPool) {
    let id = common::seed_account(&pool, "kate@example.com").await;
    sqlx::query("DELETE FROM accounts WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    let server = make_server(pool);
    let response = server
        .post("/api/auth/refresh")
        .add_header(COOKIE, common::refresh_cookie_for(id))
        .await;

    response.assert_status_unauthorized();
}

// ─── Logout ──────────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_logout_clears_both_cookies(pool: PgPool) {
    let server = make_server(pool);

    let response = server.post("/api/auth/logout").await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["ok"], true);

    let cookies = set_cookie_values(&response);
    assert_eq!(cookies.len(), 2);
    for cookie in &cookies {
        assert!(cookie.contains("Max-Age=0"));
    }
    assert!(cookies.iter().any(|c| c.starts_with("access_token=;")));
    assert!(cookies.iter().any(|c| c.starts_with("refresh_token=;")));
}

#[sqlx::test]
async fn test_logout_is_idempotent(pool: PgPool) {
    let server = make_server(pool);

    // No session, repeated calls: always succeeds.
    for _ in 0..3 {
        server.post("/api/auth/logout").await.assert_status_ok();
    }
}

#[sqlx::test]
async fn test_me_fails_after_logout_with_saved_cookies(pool: PgPool) {
    let mut server = make_server(pool);
    server.save_cookies();

    server
        .post("/api/auth/register")
        .json(&json!({ "email": "logan@example.com", "password": "sup3r-s3cret" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    server.post("/api/auth/logout").await.assert_status_ok();

    // The cleared cookies leave no reachable session.
    server.get("/api/auth/me").await.assert_status_unauthorized();
}
