pub use sea_orm_migration::prelude::*;

mod m20210501_000001_student;
mod m20210501_000002_session;
mod m20210501_000003_invoice;
mod m20210501_000004_platform_cookie;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20210501_000001_student::Migration),
            Box::new(m20210501_000002_session::Migration),
            Box::new(m20210501_000003_invoice::Migration),
            Box::new(m20210501_000004_platform_cookie::Migration),
        ]
    }
}
