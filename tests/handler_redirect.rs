mod common;

use axum::{
    Router,
    extract::ConnectInfo,
    routing::{delete, get, post},
};
use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::PgPool;
use std::net::SocketAddr;
use tower::Layer;
use url_keyspace::api::handlers::{delete_handler, redirect_handler, shorten_handler};

use common::OWNER_HEADER;

#[derive(Clone)]
struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
struct MockConnectInfoService<S> {
    inner: S,
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
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

fn redirect_app(state: url_keyspace::AppState) -> Router {
    Router::new()
        .route("/{key}", get(redirect_handler))
        .layer(MockConnectInfoLayer)
        .with_state(state)
}

fn full_app(state: url_keyspace::AppState) -> Router {
    Router::new()
        .route("/{key}", get(redirect_handler))
        .route("/api/v1/shorten", post(shorten_handler))
        .route("/api/v1/shorten/{key}", delete(delete_handler))
        .layer(MockConnectInfoLayer)
        .with_state(state)
}

async fn shorten(server: &TestServer, url: &str) -> String {
    let response = server
        .post("/api/v1/shorten")
        .add_header(OWNER_HEADER, "u1")
        .json(&json!({ "url": url }))
        .await;

    assert_eq!(response.status_code(), 201);
    response.json::<Value>()["key"].as_str().unwrap().to_string()
}

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(redirect_app(state)).unwrap();

    common::create_test_url(&pool, "redir01", "https://example.com/target", "u1").await;

    let response = server.get("/redir01").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[sqlx::test]
async fn test_redirect_not_found(pool: PgPool) {
    let (state, mut rx) = common::create_test_state(pool);
    let server = TestServer::new(redirect_app(state)).unwrap();

    let response = server.get("/missing").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<serde_json::Value>()["error"]["code"], "not_found");
    assert!(rx.try_recv().is_err());
}

#[sqlx::test]
async fn test_redirect_malformed_key_is_not_found(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(redirect_app(state)).unwrap();

    server.get("/ab").await.assert_status_not_found();
    server.get("/has.dot1").await.assert_status_not_found();
    server
        .get("/waytoolongkey12345")
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_redirect_records_event(pool: PgPool) {
    let (state, mut rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(redirect_app(state)).unwrap();

    common::create_test_url(&pool, "event01", "https://example.com", "u1").await;

    server.get("/event01").await;

    let event = rx.try_recv().unwrap();
    assert_eq!(event.key, "event01");
    assert_eq!(event.client_ip, "127.0.0.1");
    assert!(event.response_time_ms >= 0.0);
}

#[sqlx::test]
async fn test_redirect_ignores_forwarded_header_without_proxy(pool: PgPool) {
    let (state, mut rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(redirect_app(state)).unwrap();

    common::create_test_url(&pool, "event02", "https://example.com", "u1").await;

    server
        .get("/event02")
        .add_header("X-Forwarded-For", "203.0.113.7")
        .await;

    assert_eq!(rx.try_recv().unwrap().client_ip, "127.0.0.1");
}

#[sqlx::test]
async fn test_redirect_served_from_cache_after_first_hit(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(redirect_app(state)).unwrap();

    common::create_test_url(&pool, "cached1", "https://example.com/cached", "u1").await;

    server.get("/cached1").await;

    // Remove the row behind the service's back; the cached entry still answers.
    sqlx::query("DELETE FROM urls WHERE key = $1")
        .bind("cached1")
        .execute(&pool)
        .await
        .unwrap();

    let response = server.get("/cached1").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/cached");
}

#[sqlx::test]
async fn test_redirect_percent_encodes_location(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(full_app(state)).unwrap();

    let cases = [
        ("https://example.com/caf\u{e9}", "https://example.com/caf%C3%A9"),
        ("https://example.com/a b", "https://example.com/a%20b"),
    ];

    for (submitted, location) in cases {
        let key = shorten(&server, submitted).await;

        let response = server.get(&format!("/{}", key)).await;

        assert_eq!(response.status_code(), 307);
        assert_eq!(response.header("location"), location);
    }
}

#[sqlx::test]
async fn test_control_characters_never_stored(pool: PgPool) {
    let (state, mut rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(full_app(state)).unwrap();

    let response = server
        .post("/api/v1/shorten")
        .add_header(OWNER_HEADER, "u1")
        .json(&json!({ "url": "https://exa\nmple.com/x" }))
        .await;

    response.assert_status_bad_request();

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
    assert!(rx.try_recv().is_err());
}

#[sqlx::test]
async fn test_deleted_key_stops_resolving(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(full_app(state)).unwrap();

    let key = shorten(&server, "https://example.com/short-lived").await;

    // Second hit is served from the cache.
    for _ in 0..2 {
        assert_eq!(server.get(&format!("/{}", key)).await.status_code(), 307);
    }

    server
        .delete(&format!("/api/v1/shorten/{}", key))
        .add_header(OWNER_HEADER, "u1")
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    server
        .get(&format!("/{}", key))
        .await
        .assert_status_not_found();

    server
        .delete(&format!("/api/v1/shorten/{}", key))
        .add_header(OWNER_HEADER, "u1")
        .await
        .assert_status_not_found();
}
