#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;
use url_keyspace::config::{CacheBackend, Config};
use url_keyspace::domain::resolution_event::ResolutionEvent;
use url_keyspace::infrastructure::cache::MemoryCache;
use url_keyspace::state::AppState;

pub const OWNER_HEADER: &str = "X-Owner-Id";

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/test".to_string(),
        redis_url: None,
        cache_backend: CacheBackend::Memory,
        cache_ttl_seconds: 3600,
        cache_max_capacity: 1000,
        listen_addr: "127.0.0.1:0".to_string(),
        short_url_base: "http://s.test/".to_string(),
        app_name: "Test Keyspace".to_string(),
        admin_email: Some("admin@example.com".to_string()),
        items_per_page: 10,
        top_keys_limit: 5,
        key_length: 7,
        store_timeout_ms: 2000,
        cache_timeout_ms: 200,
        metrics_queue_capacity: 100,
        metrics_worker_concurrency: 2,
        behind_proxy: false,
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        db_max_connections: 5,
        db_connect_timeout: 5,
        db_idle_timeout: 60,
        db_max_lifetime: 600,
    }
}

pub fn create_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<ResolutionEvent>) {
    let config = test_config();
    let (tx, rx) = mpsc::channel(config.metrics_queue_capacity);
    let cache = Arc::new(MemoryCache::new(
        config.cache_max_capacity,
        config.cache_ttl_seconds,
    ));

    let state = AppState::new(Arc::new(pool), cache, tx, &config).unwrap();

    (state, rx)
}

pub async fn create_test_url(pool: &PgPool, key: &str, url: &str, owner: &str) {
    sqlx::query("INSERT INTO urls (key, original_url, owner_id) VALUES ($1, $2, $3)")
        .bind(key)
        .bind(url)
        .bind(owner)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_test_metric(pool: &PgPool, key: &str, ip: &str, response_time: f64) {
    sqlx::query(
        "INSERT INTO metrics (key, owner_id, client_ip, response_time)
         SELECT key, owner_id, $2, $3 FROM urls WHERE key = $1",
    )
    .bind(key)
    .bind(ip)
    .bind(response_time)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn count_metrics(pool: &PgPool, key: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM metrics WHERE key = $1")
        .bind(key)
        .fetch_one(pool)
        .await
        .unwrap()
}
