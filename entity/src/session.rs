use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "session")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Platform id of the student, not enforced as a foreign key since sessions
    /// are imported before their students.
    pub recipient: i64,
    pub session_date: DateTimeUtc,
    pub project_level: String,
    pub session_type: String,
    pub status: String,
    pub life_cycle_status: String,
    pub video_conference: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
