use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "factoids")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Lookup key used by the bot and the `/api/factoid/{name}` routes.
    #[sea_orm(unique)]
    pub name: String,

    pub content: String,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::Name).all(db).await
    }

    pub async fn find_by_name(db: &DbConn, name: &str) -> Result<Option<Model>, DbErr> {
        Entity::find().filter(Column::Name.eq(name)).one(db).await
    }

    /// Creates the factoid or replaces the content of an existing one.
    pub async fn upsert(db: &DbConn, name: &str, content: &str) -> Result<Model, DbErr> {
        let now = Utc::now();

        match Self::find_by_name(db, name).await? {
            Some(existing) => {
                let mut active: ActiveModel = existing.into();
                active.content = Set(content.to_owned());
                active.updated_at = Set(now);
                active.update(db).await
            }
            None => {
                let factoid = ActiveModel {
                    name: Set(name.to_owned()),
                    content: Set(content.to_owned()),
                    updated_at: Set(now),
                    ..Default::default()
                };
                factoid.insert(db).await
            }
        }
    }

    /// Returns `true` when a row was removed.
    pub async fn delete_by_name(db: &DbConn, name: &str) -> Result<bool, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::Name.eq(name))
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
