use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invoice::Table)
                    .if_not_exists()
                    .col(string(Invoice::Id).primary_key())
                    .col(string_uniq(Invoice::Date))
                    .col(string(Invoice::Status))
                    .col(double(Invoice::Total))
                    .col(json_binary(Invoice::Items))
                    .col(string_null(Invoice::Filename))
                    .col(blob_null(Invoice::File))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invoice::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Invoice {
    Table,
    Id,
    Date,
    Status,
    Total,
    Items,
    Filename,
    File,
}
