use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryFilter};
use serde::{Deserialize, Serialize};

/// A single permission grant: `discord_id` holds `permission`.
///
/// Rows are not unique per (discord_id, permission); the same grant may be
/// stored more than once and callers that count grants see every copy.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "permissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// External identity of the principal (Discord user id).
    pub discord_id: String,

    /// Dotted permission name, e.g. `factoid.manage`.
    pub permission: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Number of rows granting `permission` to `discord_id`.
    pub async fn count_grants(
        db: &DbConn,
        discord_id: &str,
        permission: &str,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::DiscordId.eq(discord_id))
            .filter(Column::Permission.eq(permission))
            .count(db)
            .await
    }

    pub async fn grant(db: &DbConn, discord_id: &str, permission: &str) -> Result<Model, DbErr> {
        let row = ActiveModel {
            discord_id: Set(discord_id.to_owned()),
            permission: Set(permission.to_owned()),
            ..Default::default()
        };

        row.insert(db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn count_grants_counts_every_matching_row() {
        let db = setup_test_db().await;

        assert_eq!(Model::count_grants(&db, "1001", "factoid.manage").await.unwrap(), 0);

        Model::grant(&db, "1001", "factoid.manage").await.unwrap();
        assert_eq!(Model::count_grants(&db, "1001", "factoid.manage").await.unwrap(), 1);

        Model::grant(&db, "1001", "factoid.manage").await.unwrap();
        assert_eq!(Model::count_grants(&db, "1001", "factoid.manage").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn count_grants_matches_identity_and_permission_together() {
        let db = setup_test_db().await;

        Model::grant(&db, "1001", "factoid.manage").await.unwrap();
        Model::grant(&db, "2002", "factoid.manage").await.unwrap();
        Model::grant(&db, "1001", "users.manage").await.unwrap();

        assert_eq!(Model::count_grants(&db, "1001", "factoid.manage").await.unwrap(), 1);
        assert_eq!(Model::count_grants(&db, "2002", "users.manage").await.unwrap(), 0);
        assert_eq!(Model::count_grants(&db, "3003", "factoid.manage").await.unwrap(), 0);
    }
}
