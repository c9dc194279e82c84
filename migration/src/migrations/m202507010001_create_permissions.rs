use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202507010001_create_permissions"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("permissions"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("discord_id")).string().not_null())
                    .col(ColumnDef::new(Alias::new("permission")).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Not unique: duplicate grants are possible and the gate counts them.
        manager
            .create_index(
                Index::create()
                    .name("idx_permissions_discord_id_permission")
                    .table(Alias::new("permissions"))
                    .col(Alias::new("discord_id"))
                    .col(Alias::new("permission"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("permissions")).to_owned())
            .await
    }
}
