#![allow(dead_code)]

use shortlink::application::services::{AuthService, LinkService, TokenKind, TokenService};
use shortlink::infrastructure::persistence::{PgAccountRepository, PgLinkRepository};
use shortlink::state::AppState;
use shortlink::utils::password::hash_password;
use sqlx::PgPool;
use std::sync::Arc;

/// Password used for every seeded account.
pub const TEST_PASSWORD: &str = "sup3r-s3cret";

/// Token codec with the same secrets as [`create_test_state`], so tests can
/// mint cookies for seeded accounts without going through the login endpoint.
pub fn test_token_service() -> TokenService {
    TokenService::new(
        "test-access-secret".to_string(),
        "test-refresh-secret".to_string(),
        15,
        7,
    )
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let pool = Arc::new(pool);

    let account_repo = Arc::new(PgAccountRepository::new(pool.clone()));
    let link_repo = Arc::new(PgLinkRepository::new(pool.clone()));

    let auth_service = Arc::new(AuthService::new(account_repo, test_token_service()));
    let link_service = Arc::new(LinkService::new(link_repo));

    AppState::new(auth_service, link_service, false)
}

pub async fn seed_account(pool: &PgPool, email: &str) -> i64 {
    let hash = hash_password(TEST_PASSWORD).unwrap();

    sqlx::query_scalar::<_, i64>(
        "INSERT INTO accounts (email, password_hash) VALUES ($1, $2) RETURNING id",
    )
    .bind(email)
    .bind(hash)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_link(pool: &PgPool, code: &str, url: &str, owner_id: i64) {
    sqlx::query("INSERT INTO links (code, long_url, owner_id) VALUES ($1, $2, $3)")
        .bind(code)
        .bind(url)
        .bind(owner_id)
        .execute(pool)
        .await
        .unwrap();
}

/// A `Cookie` header value carrying a valid access token for `account_id`.
pub fn access_cookie_for(account_id: i64) -> String {
    let token = test_token_service()
        .issue(account_id, TokenKind::Access)
        .unwrap();
    format!("access_token={token}")
}

/// A `Cookie` header value carrying a valid refresh token for `account_id`.
pub fn refresh_cookie_for(account_id: i64) -> String {
    let token = test_token_service()
        .issue(account_id, TokenKind::Refresh)
        .unwrap();
    format!("refresh_token={token}")
}
