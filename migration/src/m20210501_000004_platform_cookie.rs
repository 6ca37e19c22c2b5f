use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PlatformCookie::Table)
                    .if_not_exists()
                    .col(pk_auto(PlatformCookie::Id))
                    .col(string(PlatformCookie::SessionId))
                    .col(string(PlatformCookie::AccessToken))
                    .col(timestamp_with_time_zone(PlatformCookie::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlatformCookie::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PlatformCookie {
    Table,
    Id,
    SessionId,
    AccessToken,
    CreatedAt,
}
