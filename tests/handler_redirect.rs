mod common;

use axum::http::header::LOCATION;
use axum::{Router, routing::get};
use axum_test::TestServer;
use shortlink::api::handlers::redirect_handler;
use sqlx::PgPool;

fn make_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_redirect_found(pool: PgPool) {
    let id = common::seed_account(&pool, "alice@example.com").await;
    common::seed_link(&pool, "go0001", "https://example.com/landing", id).await;

    let server = make_server(pool);
    let response = server.get("/go0001").await;

    response.assert_status(axum::http::StatusCode::FOUND);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        "https://example.com/landing"
    );
}

#[sqlx::test]
async fn test_redirect_counts_clicks(pool: PgPool) {
    let id = common::seed_account(&pool, "bob@example.com").await;
    common::seed_link(&pool, "go0002", "https://example.com", id).await;

    let server = make_server(pool.clone());
    for _ in 0..3 {
        server
            .get("/go0002")
            .await
            .assert_status(axum::http::StatusCode::FOUND);
    }

    let (clicks, visited): (i64, Option<chrono::DateTime<chrono::Utc>>) =
        sqlx::query_as("SELECT clicks, last_visited_at FROM links WHERE code = 'go0002'")
            .fetch_one(&pool)
            .await
            .unwrap();

    assert_eq!(clicks, 3);
    assert!(visited.is_some());
}

#[sqlx::test]
async fn test_redirect_unknown_code(pool: PgPool) {
    let server = make_server(pool);

    let response = server.get("/nosuch").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<serde_json::Value>()["code"], "NOT_FOUND");
    assert_eq!(response.json::<serde_json::Value>()["ok"], false);
}

#[sqlx::test]
async fn test_redirect_does_not_require_auth(pool: PgPool) {
    let id = common::seed_account(&pool, "carol@example.com").await;
    common::seed_link(&pool, "public", "https://example.com", id).await;

    // No cookies at all.
    let server = make_server(pool);
    let response = server.get("/public").await;

    response.assert_status(axum::http::StatusCode::FOUND);
}
