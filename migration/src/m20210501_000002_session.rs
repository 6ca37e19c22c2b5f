use sea_orm_migration::{prelude::*, schema::*};

static IDX_SESSION_RECIPIENT: &str = "idx-session-recipient";
static IDX_SESSION_SESSION_DATE: &str = "idx-session-session_date";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Session::Table)
                    .if_not_exists()
                    .col(big_integer(Session::Id).primary_key())
                    .col(big_integer(Session::Recipient))
                    .col(timestamp_with_time_zone(Session::SessionDate))
                    .col(string(Session::ProjectLevel))
                    .col(string(Session::SessionType))
                    .col(string(Session::Status))
                    .col(string(Session::LifeCycleStatus))
                    .col(string_null(Session::VideoConference))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SESSION_RECIPIENT)
                    .table(Session::Table)
                    .col(Session::Recipient)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SESSION_SESSION_DATE)
                    .table(Session::Table)
                    .col(Session::SessionDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SESSION_SESSION_DATE)
                    .table(Session::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SESSION_RECIPIENT)
                    .table(Session::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Session::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Session {
    Table,
    Id,
    Recipient,
    SessionDate,
    ProjectLevel,
    SessionType,
    Status,
    LifeCycleStatus,
    VideoConference,
}
