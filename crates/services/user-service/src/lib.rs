//! User Service Library
//!
//! Create/read/update/delete for user records on a relational store:
//! a persistence gateway running one transaction per call, and an
//! application service validating input and guarding existence in front
//! of it.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use sea_orm::DbErr;
use tracing::info;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::UserManager;

/// Wire the service on top of an already connected database handle.
pub fn build_service(db: &Database) -> UserManager {
    let user_repo = Arc::new(UserStore::new(db.get_connection()));
    UserManager::new(user_repo)
}

/// Connect (applying pending migrations) and build the service.
///
/// The returned `Database` is the handle to close at shutdown.
pub async fn connect_service(config: &UserServiceConfig) -> Result<(Database, UserManager), DbErr> {
    let db = Database::connect(&config.database).await?;
    let service = build_service(&db);
    Ok((db, service))
}

/// Run migrations (for CLI commands).
///
/// Returns `(migration name, applied)` pairs for `Status`, empty otherwise.
pub async fn run_migrations(
    config: &UserServiceConfig,
    action: MigrateAction,
) -> Result<Vec<(String, bool)>, DbErr> {
    let db = Database::connect_without_migrations(&config.database).await?;

    let status = match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
            Vec::new()
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
            Vec::new()
        }
        MigrateAction::Status => db.migration_status().await?,
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
            Vec::new()
        }
    };

    db.close().await?;
    Ok(status)
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
