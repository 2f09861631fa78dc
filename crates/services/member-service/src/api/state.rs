//! Application state shared by all handlers.

use std::sync::Arc;

use crate::api::middleware::TokenCodec;
use crate::config::MemberServiceConfig;
use crate::infra::{CacheManager, Database};
use crate::service::{ServiceContainer, Services};

#[derive(Clone)]
pub struct AppState {
    /// Service chains
    pub services: Arc<dyn ServiceContainer>,
    /// Bearer token verification
    pub tokens: Arc<TokenCodec>,
    /// Cache backend, checked by the health check
    pub cache: Arc<dyn CacheManager>,
    /// Database connection, checked by the health check
    pub database: Database,
}

impl AppState {
    /// Build the service container and token codec from configuration.
    pub fn from_config(
        database: Database,
        cache: Arc<dyn CacheManager>,
        config: &MemberServiceConfig,
    ) -> Self {
        let services = Arc::new(Services::from_connection(
            database.get_connection(),
            cache.clone(),
            std::time::Duration::from_secs(config.cache.default_ttl_seconds),
            config.locale,
        ));

        Self::new(services, TokenCodec::new(&config.jwt.secret), cache, database)
    }

    pub fn new(
        services: Arc<dyn ServiceContainer>,
        tokens: TokenCodec,
        cache: Arc<dyn CacheManager>,
        database: Database,
    ) -> Self {
        Self {
            services,
            tokens: Arc::new(tokens),
            cache,
            database,
        }
    }
}
