//! Member service configuration.

use std::env;

use common::{AppError, AppResult, CacheBackend, CacheConfig, DatabaseConfig, JwtConfig, ServiceConfig};
use domain::Locale;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Secret used in debug builds when `JWT_SECRET` is not set
const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Member service configuration.
#[derive(Debug, Clone)]
pub struct MemberServiceConfig {
    pub server: ServiceConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub jwt: JwtConfig,
    /// Language of result messages
    pub locale: Locale,
}

impl MemberServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults. Malformed values and a missing
    /// or short JWT secret in release builds are reported as errors.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let server_defaults = ServiceConfig::default();
        let database_defaults = DatabaseConfig::default();
        let cache_defaults = CacheConfig::default();

        let server = ServiceConfig {
            service_name: "member-service".to_string(),
            host: env::var("SERVER_HOST").unwrap_or(server_defaults.host),
            port: parse_var("SERVER_PORT")?.unwrap_or(server_defaults.port),
        };

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or(database_defaults.url),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS")?
                .unwrap_or(database_defaults.max_connections),
            min_connections: parse_var("DATABASE_MIN_CONNECTIONS")?
                .unwrap_or(database_defaults.min_connections),
        };

        let cache = CacheConfig {
            backend: match env::var("CACHE_BACKEND") {
                Ok(value) => value.parse::<CacheBackend>()?,
                Err(_) => cache_defaults.backend,
            },
            url: env::var("REDIS_URL").unwrap_or(cache_defaults.url),
            default_ttl_seconds: parse_var("CACHE_TTL_SECONDS")?
                .unwrap_or(cache_defaults.default_ttl_seconds),
        };

        let locale = match env::var("APP_LOCALE") {
            Ok(value) => value.parse::<Locale>()?,
            Err(_) => Locale::default(),
        };

        let jwt = JwtConfig {
            secret: jwt_secret_from_env()?,
        };

        Ok(Self {
            server,
            database,
            cache,
            jwt,
            locale,
        })
    }
}

impl Default for MemberServiceConfig {
    fn default() -> Self {
        Self {
            server: ServiceConfig {
                service_name: "member-service".to_string(),
                ..ServiceConfig::default()
            },
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            jwt: JwtConfig {
                secret: DEV_JWT_SECRET.to_string(),
            },
            locale: Locale::default(),
        }
    }
}

fn jwt_secret_from_env() -> AppResult<String> {
    let secret = match env::var("JWT_SECRET") {
        Ok(secret) => secret,
        Err(_) if cfg!(debug_assertions) => {
            // Development mode: use default but warn
            tracing::warn!("JWT_SECRET not set, using insecure default for development");
            DEV_JWT_SECRET.to_string()
        }
        Err(_) => {
            return Err(AppError::validation(
                "JWT_SECRET environment variable must be set in production",
            ))
        }
    };

    if secret.len() < MIN_JWT_SECRET_LENGTH {
        return Err(AppError::validation(format!(
            "JWT_SECRET must be at least {} characters long",
            MIN_JWT_SECRET_LENGTH
        )));
    }

    Ok(secret)
}

/// Parse an optional environment variable.
fn parse_var<T: std::str::FromStr>(name: &str) -> AppResult<Option<T>> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| AppError::validation(format!("{} has an invalid value '{}'", name, value))),
        Err(_) => Ok(None),
    }
}
