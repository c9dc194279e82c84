pub mod models;
pub mod test_utils;

use migration::Migrator;
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use util::paths::ensure_parent_dir;

/// Opens the database named by `path_or_url`.
///
/// DSNs are used as-is; anything else is treated as a SQLite file path whose
/// parent directory is created on demand.
pub async fn connect(path_or_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(&database_url(path_or_url)).await
}

/// Brings the schema up to date.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await
}

fn database_url(path_or_url: &str) -> String {
    if path_or_url.starts_with("sqlite:")
        || path_or_url.starts_with("postgres://")
        || path_or_url.starts_with("mysql://")
    {
        return path_or_url.to_string();
    }

    // SQLite won't create intermediate dirs.
    if let Err(e) = ensure_parent_dir(path_or_url) {
        tracing::warn!(error = %e, path = path_or_url, "could not create database directory");
    }
    format!("sqlite://{path_or_url}?mode=rwc")
}
