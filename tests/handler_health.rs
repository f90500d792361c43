mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use overmind_shortener::api::handlers::health_handler;
use serde_json::Value;
use sqlx::SqlitePool;

fn server(pool: SqlitePool) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(common::create_test_state(pool));

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_health_endpoint_success(pool: SqlitePool) {
    common::create_test_link(&pool, "Hlth", "https://example.com", 1_000).await;
    let server = server(pool);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["database"]["message"], "Connected, 1 links");
}

#[sqlx::test]
async fn test_health_endpoint_degraded(pool: SqlitePool) {
    let server = server(pool.clone());
    pool.close().await;

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
}
