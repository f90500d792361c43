mod common;

use axum::{Router, http::StatusCode, middleware};
use axum_test::TestServer;
use common::MockConnectInfoLayer;
use overmind_shortener::api::middleware::auth;
use overmind_shortener::api::routes::protected_routes;
use overmind_shortener::state::AdminGuard;
use sqlx::SqlitePool;

fn server(pool: SqlitePool, guard: AdminGuard, peer: &str) -> TestServer {
    let state = common::create_test_state_with_guard(pool, guard);
    let api = protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
    let app = Router::new()
        .nest("/api", api)
        .layer(MockConnectInfoLayer::new(peer))
        .with_state(state);

    TestServer::new(app).unwrap()
}

fn guard(password: Option<&str>, ips: &[&str], behind_proxy: bool) -> AdminGuard {
    AdminGuard {
        password: password.map(str::to_string),
        allowed_ips: ips.iter().map(|ip| ip.to_string()).collect(),
        behind_proxy,
    }
}

#[sqlx::test]
async fn test_open_when_nothing_configured(pool: SqlitePool) {
    let server = server(pool, AdminGuard::default(), "203.0.113.7:4000");

    server.get("/api/shorten/links").await.assert_status_ok();
}

#[sqlx::test]
async fn test_password_missing(pool: SqlitePool) {
    let server = server(pool, guard(Some("s3cret"), &[], false), "10.0.0.1:4000");

    let response = server.get("/api/shorten/links").await;

    response.assert_status_unauthorized();
    assert_eq!(response.header("www-authenticate"), "Bearer");
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "unauthorized"
    );
}

#[sqlx::test]
async fn test_password_wrong(pool: SqlitePool) {
    let server = server(pool, guard(Some("s3cret"), &[], false), "10.0.0.1:4000");

    server
        .get("/api/shorten/links")
        .add_header("X-Admin-Password", "guess")
        .await
        .assert_status_unauthorized();

    server
        .get("/api/shorten/links")
        .add_header("Authorization", "Bearer guess")
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_password_via_header(pool: SqlitePool) {
    let server = server(pool, guard(Some("s3cret"), &[], false), "10.0.0.1:4000");

    server
        .get("/api/shorten/links")
        .add_header("X-Admin-Password", "s3cret")
        .await
        .assert_status_ok();
}

#[sqlx::test]
async fn test_password_via_bearer(pool: SqlitePool) {
    let server = server(pool, guard(Some("s3cret"), &[], false), "10.0.0.1:4000");

    server
        .get("/api/shorten/links")
        .add_header("Authorization", "Bearer s3cret")
        .await
        .assert_status_ok();
}

#[sqlx::test]
async fn test_ip_not_in_allowlist(pool: SqlitePool) {
    let server = server(pool, guard(None, &["203.0.113.7"], false), "10.0.0.1:4000");

    let response = server.get("/api/shorten/links").await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["message"],
        "Access denied. IP not in allowlist."
    );
}

#[sqlx::test]
async fn test_ip_in_allowlist(pool: SqlitePool) {
    let server = server(pool, guard(None, &["203.0.113.7"], false), "203.0.113.7:4000");

    server.get("/api/shorten/links").await.assert_status_ok();
}

#[sqlx::test]
async fn test_ipv6_loopback_matches_ipv4_entry(pool: SqlitePool) {
    let server = server(pool, guard(None, &["127.0.0.1"], false), "[::1]:4000");

    server.get("/api/shorten/links").await.assert_status_ok();
}

#[sqlx::test]
async fn test_forwarded_ip_ignored_unless_behind_proxy(pool: SqlitePool) {
    let server = server(pool, guard(None, &["203.0.113.7"], false), "10.0.0.1:4000");

    server
        .get("/api/shorten/links")
        .add_header("X-Forwarded-For", "203.0.113.7")
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[sqlx::test]
async fn test_forwarded_ip_behind_proxy(pool: SqlitePool) {
    let server = server(pool, guard(None, &["203.0.113.7"], true), "10.0.0.1:4000");

    server
        .get("/api/shorten/links")
        .add_header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
        .await
        .assert_status_ok();
}

#[sqlx::test]
async fn test_ip_checked_before_password(pool: SqlitePool) {
    let server = server(
        pool,
        guard(Some("s3cret"), &["203.0.113.7"], false),
        "10.0.0.1:4000",
    );

    server
        .get("/api/shorten/links")
        .add_header("X-Admin-Password", "s3cret")
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[sqlx::test]
async fn test_allowed_ip_still_needs_password(pool: SqlitePool) {
    let server = server(
        pool,
        guard(Some("s3cret"), &["203.0.113.7"], false),
        "203.0.113.7:4000",
    );

    server
        .get("/api/shorten/links")
        .await
        .assert_status_unauthorized();

    server
        .get("/api/shorten/links")
        .add_header("X-Admin-Password", "s3cret")
        .await
        .assert_status_ok();
}
