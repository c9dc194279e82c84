//! Helpers for tests in this crate and in dependent crates.

use crate::models::permission;
use sea_orm::{ConnectionTrait, DatabaseConnection};

/// Fresh, fully migrated in-memory database.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = crate::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory db");

    crate::migrate(&db).await.expect("Failed to run migrations");

    db
}

/// Stores `copies` identical grant rows for the principal.
pub async fn seed_grants(db: &DatabaseConnection, discord_id: &str, permission: &str, copies: usize) {
    for _ in 0..copies {
        permission::Model::grant(db, discord_id, permission)
            .await
            .expect("Failed to seed permission");
    }
}

/// Drops the `permissions` table so any grant lookup fails with `no such table`.
///
/// A request that still succeeds (or is rejected for another reason)
/// afterwards provably never queried the permission store.
pub async fn break_permission_store(db: &DatabaseConnection) {
    db.execute_unprepared("DROP TABLE permissions")
        .await
        .expect("Failed to drop permissions table");
}
