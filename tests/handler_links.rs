mod common;

use axum::{
    Router,
    routing::{delete, get},
};
use axum_test::TestServer;
use overmind_shortener::api::handlers::{delete_link_handler, list_links_handler};
use serde_json::Value;
use sqlx::SqlitePool;

fn server(pool: SqlitePool) -> TestServer {
    let app = Router::new()
        .route("/api/shorten/links", get(list_links_handler))
        .route("/api/shorten/{code}", delete(delete_link_handler))
        .with_state(common::create_test_state(pool));

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_list_links_empty(pool: SqlitePool) {
    let server = server(pool);

    let response = server.get("/api/shorten/links").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["links"].as_array().unwrap().len(), 0);
}

#[sqlx::test]
async fn test_list_links_newest_first(pool: SqlitePool) {
    common::create_test_link(&pool, "Lnk1", "https://example.com/1", 1_000).await;
    common::create_test_link(&pool, "Lnk2", "https://example.com/2", 2_000).await;
    common::create_test_link(&pool, "Lnk3", "https://example.com/3", 3_000).await;
    let server = server(pool);

    let response = server
        .get("/api/shorten/links")
        .add_query_param("limit", 2)
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    let links = json["links"].as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["code"], "Lnk3");
    assert_eq!(links[1]["code"], "Lnk2");
    assert_eq!(links[0]["longUrl"], "https://example.com/3");
    assert_eq!(links[0]["createdAt"], 3_000);
    assert_eq!(links[0]["clicks"], 0);
    assert_eq!(links[0]["shortUrl"], "https://go.example.com/s/Lnk3");
}

#[sqlx::test]
async fn test_list_links_default_limit(pool: SqlitePool) {
    for i in 0..55 {
        let code = format!("L{i:03}");
        common::create_test_link(&pool, &code, "https://example.com", i).await;
    }
    let server = server(pool);

    let response = server.get("/api/shorten/links").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["links"].as_array().unwrap().len(), 50);
}

#[sqlx::test]
async fn test_list_links_invalid_limit(pool: SqlitePool) {
    let server = server(pool);

    for limit in ["0", "501", "abc"] {
        let response = server
            .get("/api/shorten/links")
            .add_query_param("limit", limit)
            .await;

        response.assert_status_bad_request();
    }
}

#[sqlx::test]
async fn test_delete_link(pool: SqlitePool) {
    common::create_test_link(&pool, "Del1", "https://example.com", 1_000).await;
    let server = server(pool.clone());

    let response = server.delete("/api/shorten/Del1").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["success"], true);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[sqlx::test]
async fn test_delete_link_twice(pool: SqlitePool) {
    common::create_test_link(&pool, "Del2", "https://example.com", 1_000).await;
    let server = server(pool);

    server.delete("/api/shorten/Del2").await.assert_status_ok();
    let response = server.delete("/api/shorten/Del2").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[sqlx::test]
async fn test_delete_malformed_code(pool: SqlitePool) {
    let server = server(pool);

    server
        .delete("/api/shorten/not-a-code")
        .await
        .assert_status_not_found();
}
