//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{CreationService, MetricsCollector, ResolutionService};
use crate::config::Config;
use crate::domain::repositories::UrlRepository;
use crate::domain::resolution_event::ResolutionEvent;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{PgMetricsRepository, PgUrlRepository};
use crate::utils::key_deriver::KeyDeriver;

pub type AppCreationService = CreationService<PgUrlRepository>;
pub type AppResolutionService = ResolutionService<PgUrlRepository, PgMetricsRepository>;
pub type AppMetricsCollector = MetricsCollector<PgMetricsRepository>;

/// Settings the HTTP layer reads per request.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub short_url_base: String,
    pub app_name: String,
    pub admin_email: Option<String>,
    pub items_per_page: i64,
    pub top_keys_limit: i64,
    pub behind_proxy: bool,
}

impl AppSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            short_url_base: config.short_url_base.clone(),
            app_name: config.app_name.clone(),
            admin_email: config.admin_email.clone(),
            items_per_page: config.items_per_page,
            top_keys_limit: config.top_keys_limit,
            behind_proxy: config.behind_proxy,
        }
    }

    /// Renders the public short URL of a key.
    pub fn short_url(&self, key: &str) -> String {
        format!("{}/{}", self.short_url_base.trim_end_matches('/'), key)
    }
}

/// Explicit context built once at startup and shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub creation_service: Arc<AppCreationService>,
    pub resolution_service: Arc<AppResolutionService>,
    pub metrics_collector: Arc<AppMetricsCollector>,
    pub url_repository: Arc<PgUrlRepository>,
    pub cache: Arc<dyn CacheService>,
    pub settings: Arc<AppSettings>,
}

impl AppState {
    /// Wires repositories and services over a shared pool and cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the configured key length is invalid.
    pub fn new(
        pool: Arc<PgPool>,
        cache: Arc<dyn CacheService>,
        metrics_sender: mpsc::Sender<ResolutionEvent>,
        config: &Config,
    ) -> Result<Self, AppError> {
        let url_repository = Arc::new(PgUrlRepository::new(pool.clone()));
        let metrics_repository = Arc::new(PgMetricsRepository::new(pool));

        let metrics_collector = Arc::new(MetricsCollector::new(
            metrics_repository,
            metrics_sender,
        ));

        let creation_service = Arc::new(CreationService::new(
            url_repository.clone(),
            cache.clone(),
            KeyDeriver::new(config.key_length)?,
        ));

        let resolution_service = Arc::new(ResolutionService::new(
            url_repository.clone(),
            cache.clone(),
            metrics_collector.clone(),
            config.store_timeout(),
            config.cache_timeout(),
        ));

        Ok(Self {
            creation_service,
            resolution_service,
            metrics_collector,
            url_repository,
            cache,
            settings: Arc::new(AppSettings::from_config(config)),
        })
    }

    /// Pings the record store.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.url_repository.ping().await
    }
}
