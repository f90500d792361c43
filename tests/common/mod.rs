#![allow(dead_code)]

use axum::extract::ConnectInfo;
use overmind_shortener::application::services::LinkService;
use overmind_shortener::domain::entities::{Link, NewLink};
use overmind_shortener::domain::repositories::LinkRepository;
use overmind_shortener::infrastructure::persistence::SqliteLinkRepository;
use overmind_shortener::state::{AdminGuard, AppState};
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

pub const SITE_URL: &str = "https://go.example.com";

pub fn create_test_service(pool: SqlitePool) -> LinkService<SqliteLinkRepository> {
    let repo = Arc::new(SqliteLinkRepository::new(Arc::new(pool)));
    LinkService::new(repo, SITE_URL)
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    create_test_state_with_guard(pool, AdminGuard::default())
}

pub fn create_test_state_with_guard(pool: SqlitePool, guard: AdminGuard) -> AppState {
    AppState::new(Arc::new(create_test_service(pool)), guard)
}

pub async fn create_test_link(pool: &SqlitePool, code: &str, url: &str, created_at: i64) -> Link {
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));
    repo.insert(NewLink {
        code: code.to_string(),
        long_url: url.to_string(),
        created_at,
    })
    .await
    .unwrap()
}

pub async fn clicks_of(pool: &SqlitePool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM links WHERE code = ?1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Injects a fixed peer address as `ConnectInfo`, as `into_make_service_with_connect_info` would.
#[derive(Clone)]
pub struct MockConnectInfoLayer {
    pub addr: SocketAddr,
}

impl MockConnectInfoLayer {
    pub fn new(addr: &str) -> Self {
        Self {
            addr: addr.parse().unwrap(),
        }
    }
}

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService {
            inner,
            addr: self.addr,
        }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
    addr: SocketAddr,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(ConnectInfo(self.addr));
        self.inner.call(req)
    }
}
