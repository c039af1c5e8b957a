//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup and passed by value; nothing here is mutated or
//! re-read after boot.

use std::env;

use userhub_infra::JwtConfig;
use userhub_infra::database::DatabaseConfig;

const DEFAULT_JWT_KEY: &str = "change-me-in-production";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub basic_realm: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            jwt: Self::jwt_from_env(),
            basic_realm: env::var("BASIC_AUTH_REALM").unwrap_or_else(|_| "userhub".to_string()),
        }
    }

    fn jwt_from_env() -> JwtConfig {
        let key = env::var("JWT_KEY").unwrap_or_else(|_| DEFAULT_JWT_KEY.to_string());

        if key == DEFAULT_JWT_KEY {
            let is_production = env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT key in production! Set JWT_KEY environment variable."
                );
            } else {
                tracing::warn!("Using default JWT key. Set JWT_KEY for production use.");
            }
        }

        let defaults = JwtConfig::default();
        JwtConfig {
            key,
            issuer: env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: env::var("JWT_AUDIENCE").unwrap_or(defaults.audience),
            expires_in_minutes: env::var("JWT_EXPIRES_IN_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.expires_in_minutes),
        }
    }
}
