use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub display_name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub enrollment: String,
    pub language: String,
    pub organization: Option<String>,
    pub premium: bool,
    pub identity_locked: bool,
    pub profile_picture: String,
    pub profile_url: String,
    /// Billing classification scraped from the platform dashboard
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
