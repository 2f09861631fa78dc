//! Member Service Library
//!
//! Gym member and trainer management over HTTP. Managers run the business
//! rules; caching, validation and role checks are layered on as aspects.

pub mod api;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use common::{AppError, AppResult, CacheBackend, CacheConfig};
use tracing::info;

use crate::api::middleware::{Claims, TokenCodec};
use crate::api::{create_router, AppState};
use crate::config::MemberServiceConfig;
use crate::infra::{CacheManager, Database, MemoryCache, RedisCache};

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Connect the configured cache backend.
pub async fn connect_cache(config: &CacheConfig) -> AppResult<Arc<dyn CacheManager>> {
    match config.backend {
        CacheBackend::Redis => Ok(Arc::new(RedisCache::connect(config).await?)),
        CacheBackend::Memory => {
            info!("Using in-process cache");
            Ok(Arc::new(MemoryCache::new()))
        }
    }
}

/// Run the HTTP server until the process is stopped.
pub async fn run_server(config: MemberServiceConfig) -> AppResult<()> {
    info!("Starting {}...", config.server.service_name);

    let database = Database::connect(&config.database).await?;
    let cache = connect_cache(&config.cache).await?;

    let app = create_router(AppState::from_config(database, cache, &config));

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(config: &MemberServiceConfig, action: MigrateAction) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Sign a bearer token with the configured secret.
pub fn issue_token(
    config: &MemberServiceConfig,
    subject: &str,
    roles: Vec<String>,
    ttl_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(subject, roles, chrono::Duration::hours(ttl_hours));
    TokenCodec::new(&config.jwt.secret).encode(&claims)
}
