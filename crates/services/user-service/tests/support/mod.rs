//! Shared setup for integration tests: a migrated in-memory SQLite store.

use common::DatabaseConfig;
use user_service_lib::infra::Database;

/// Fresh in-memory database with the schema applied.
///
/// A single pooled connection keeps every query on the same in-memory
/// database.
pub async fn test_database() -> Database {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };

    Database::connect(&config)
        .await
        .expect("in-memory sqlite should connect and migrate")
}
