use sea_orm_migration::{prelude::*, schema::*};

static IDX_STUDENT_EMAIL: &str = "idx-student-email";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(big_integer(Student::Id).primary_key())
                    .col(string(Student::DisplayName))
                    .col(string(Student::Email))
                    .col(string(Student::FirstName))
                    .col(string(Student::LastName))
                    .col(string(Student::Enrollment))
                    .col(string(Student::Language))
                    .col(string_null(Student::Organization))
                    .col(boolean(Student::Premium))
                    .col(boolean(Student::IdentityLocked))
                    .col(string(Student::ProfilePicture))
                    .col(string(Student::ProfileUrl))
                    .col(string(Student::Status))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_STUDENT_EMAIL)
                    .table(Student::Table)
                    .col(Student::Email)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_STUDENT_EMAIL)
                    .table(Student::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Student {
    Table,
    Id,
    DisplayName,
    Email,
    FirstName,
    LastName,
    Enrollment,
    Language,
    Organization,
    Premium,
    IdentityLocked,
    ProfilePicture,
    ProfileUrl,
    Status,
}
