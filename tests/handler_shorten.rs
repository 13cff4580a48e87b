mod common;

use axum::{
    Router,
    routing::{delete, get},
};
use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::PgPool;
use url_keyspace::api::handlers::{delete_handler, list_handler, shorten_handler};
use url_keyspace::state::AppState;
use url_keyspace::utils::key_deriver::KeyDeriver;

use common::OWNER_HEADER;

fn shorten_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/shorten", get(list_handler).post(shorten_handler))
        .route("/api/v1/shorten/{key}", delete(delete_handler))
        .with_state(state)
}

#[sqlx::test]
async fn test_shorten_creates_derived_key(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(shorten_app(state)).unwrap();

    let response = server
        .post("/api/v1/shorten")
        .add_header(OWNER_HEADER, "u1")
        .json(&json!({ "url": "https://example.com/page" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let expected_key = KeyDeriver::new(7)
        .unwrap()
        .derive("https://example.com/page", "u1");

    let body = response.json::<Value>();
    assert_eq!(body["key"], expected_key);
    assert_eq!(body["short_url"], format!("http://s.test/{}", expected_key));
    assert_eq!(body["original_url"], "https://example.com/page");
    assert_eq!(body["created"], true);
}

#[sqlx::test]
async fn test_shorten_is_idempotent_per_owner(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(shorten_app(state)).unwrap();

    let first = server
        .post("/api/v1/shorten")
        .add_header(OWNER_HEADER, "u1")
        .json(&json!({ "url": "https://example.com" }))
        .await;
    let second = server
        .post("/api/v1/shorten")
        .add_header(OWNER_HEADER, "u1")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(first.status_code(), 201);
    assert_eq!(second.status_code(), 200);
    assert_eq!(first.json::<Value>()["key"], second.json::<Value>()["key"]);
    assert_eq!(second.json::<Value>()["created"], false);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test]
async fn test_shorten_same_url_other_owner_gets_other_key(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(shorten_app(state)).unwrap();

    let a = server
        .post("/api/v1/shorten")
        .add_header(OWNER_HEADER, "u1")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json::<Value>();
    let b = server
        .post("/api/v1/shorten")
        .add_header(OWNER_HEADER, "u2")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .json::<Value>();

    assert_ne!(a["key"], b["key"]);
}

#[sqlx::test]
async fn test_shorten_collision_uses_next_candidate(pool: PgPool) {
    let deriver = KeyDeriver::new(7).unwrap();
    let taken = deriver.derive("https://example.com/new", "u1");
    common::create_test_url(&pool, &taken, "https://squatter.example", "u9").await;

    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(shorten_app(state)).unwrap();

    let response = server
        .post("/api/v1/shorten")
        .add_header(OWNER_HEADER, "u1")
        .json(&json!({ "url": "https://example.com/new" }))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(
        response.json::<Value>()["key"],
        deriver.derive_with_attempt("https://example.com/new", "u1", 1)
    );
}

#[sqlx::test]
async fn test_shorten_rejects_invalid_url(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(shorten_app(state)).unwrap();

    for url in ["not a url", "ftp://example.com/file", "javascript:alert(1)", ""] {
        let response = server
            .post("/api/v1/shorten")
            .add_header(OWNER_HEADER, "u1")
            .json(&json!({ "url": url }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
    }
}

#[sqlx::test]
async fn test_shorten_requires_owner(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(shorten_app(state)).unwrap();

    let response = server
        .post("/api/v1/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_unauthorized();
}

#[sqlx::test]
async fn test_list_only_own_urls(pool: PgPool) {
    common::create_test_url(&pool, "mine001", "https://example.com/1", "u1").await;
    common::create_test_url(&pool, "mine002", "https://example.com/2", "u1").await;
    common::create_test_url(&pool, "theirs1", "https://example.com/3", "u2").await;

    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(shorten_app(state)).unwrap();

    let response = server
        .get("/api/v1/shorten")
        .add_header(OWNER_HEADER, "u1")
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["total"], 2);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["offset"], 0);

    let urls = body["urls"].as_array().unwrap();
    assert_eq!(urls.len(), 2);
    assert!(urls.iter().all(|u| u["key"] != "theirs1"));
    assert!(
        urls.iter()
            .all(|u| u["short_url"].as_str().unwrap().starts_with("http://s.test/"))
    );
}

#[sqlx::test]
async fn test_list_pagination(pool: PgPool) {
    for i in 0..3 {
        common::create_test_url(
            &pool,
            &format!("page{:03}", i),
            &format!("https://example.com/{}", i),
            "u1",
        )
        .await;
    }

    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(shorten_app(state)).unwrap();

    let response = server
        .get("/api/v1/shorten")
        .add_query_param("limit", 2)
        .add_query_param("offset", 2)
        .add_header(OWNER_HEADER, "u1")
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["total"], 3);
    assert_eq!(body["urls"].as_array().unwrap().len(), 1);
}

#[sqlx::test]
async fn test_list_rejects_bad_window(pool: PgPool) {
    let (state, _rx) = common::create_test_state(pool);
    let server = TestServer::new(shorten_app(state)).unwrap();

    server
        .get("/api/v1/shorten")
        .add_query_param("limit", 0)
        .add_header(OWNER_HEADER, "u1")
        .await
        .assert_status_bad_request();

    server
        .get("/api/v1/shorten")
        .add_query_param("offset", -1)
        .add_header(OWNER_HEADER, "u1")
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_delete_own_url(pool: PgPool) {
    common::create_test_url(&pool, "del0001", "https://example.com", "u1").await;

    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(shorten_app(state)).unwrap();

    server
        .delete("/api/v1/shorten/del0001")
        .add_header(OWNER_HEADER, "u1")
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls WHERE key = 'del0001'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[sqlx::test]
async fn test_delete_other_owners_url_is_not_found(pool: PgPool) {
    common::create_test_url(&pool, "del0002", "https://example.com", "u1").await;

    let (state, _rx) = common::create_test_state(pool.clone());
    let server = TestServer::new(shorten_app(state)).unwrap();

    server
        .delete("/api/v1/shorten/del0002")
        .add_header(OWNER_HEADER, "u2")
        .await
        .assert_status_not_found();

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls WHERE key = 'del0002'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 1);
}
