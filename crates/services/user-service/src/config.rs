//! User service configuration.

use std::env;

use common::{DatabaseConfig, LogConfig};

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// Connection pool settings
    pub database: DatabaseConfig,
    /// Default log filter
    pub log: LogConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = DatabaseConfig::default();

        Self {
            database: DatabaseConfig {
                url: env::var("USER_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.url),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(defaults.max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or(defaults.min_connections),
                connect_timeout_secs: parse_var("DATABASE_CONNECT_TIMEOUT_SECS")
                    .unwrap_or(defaults.connect_timeout_secs),
                sqlx_logging: parse_var("DATABASE_SQLX_LOGGING")
                    .unwrap_or(defaults.sqlx_logging),
            },
            log: LogConfig {
                filter: env::var("RUST_LOG").unwrap_or_else(|_| LogConfig::default().filter),
            },
        }
    }

    /// Replace the database URL (CLI override).
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database.url = url.into();
        self
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
