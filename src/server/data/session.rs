use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::session::{SessionDto, STATUS_COMPLETED, STATUS_STUDENT_ABSENT},
    server::util::time::YearMonth,
};

pub struct SessionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SessionRepository<'a, C> {
    /// Creates a new instance of [`SessionRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a session keyed by its platform id
    ///
    /// Returns `None` without writing anything when the id is already stored, which makes
    /// repeated imports of the same listing idempotent.
    pub async fn create(
        &self,
        session: &SessionDto,
    ) -> Result<Option<entity::session::Model>, DbErr> {
        if self.find_by_id(session.id).await?.is_some() {
            return Ok(None);
        }

        let session = entity::session::ActiveModel {
            id: ActiveValue::Set(session.id),
            recipient: ActiveValue::Set(session.recipient),
            session_date: ActiveValue::Set(session.session_date),
            project_level: ActiveValue::Set(session.project_level.clone()),
            session_type: ActiveValue::Set(session.session_type.clone()),
            status: ActiveValue::Set(session.status.clone()),
            life_cycle_status: ActiveValue::Set(session.life_cycle_status.clone()),
            video_conference: ActiveValue::Set(session.video_conference.clone()),
        };

        Ok(Some(session.insert(self.db).await?))
    }

    pub async fn find_by_id(&self, session_id: i64) -> Result<Option<entity::session::Model>, DbErr> {
        entity::prelude::Session::find_by_id(session_id)
            .one(self.db)
            .await
    }

    /// Gets the sessions of a student, newest first
    ///
    /// # Arguments
    /// - `recipient`: Platform id of the student
    /// - `include_status`: When not empty, only sessions with one of these statuses are returned
    /// - `exclude_status`: Sessions with one of these statuses are left out
    pub async fn find_by_recipient(
        &self,
        recipient: i64,
        include_status: &[String],
        exclude_status: &[String],
    ) -> Result<Vec<entity::session::Model>, DbErr> {
        let mut condition = Condition::all().add(entity::session::Column::Recipient.eq(recipient));

        if !include_status.is_empty() {
            condition = condition
                .add(entity::session::Column::Status.is_in(include_status.iter().cloned()));
        }
        if !exclude_status.is_empty() {
            condition = condition
                .add(entity::session::Column::Status.is_not_in(exclude_status.iter().cloned()));
        }

        entity::prelude::Session::find()
            .filter(condition)
            .order_by_desc(entity::session::Column::SessionDate)
            .all(self.db)
            .await
    }

    /// Gets sessions starting within `window_minutes` before or after `date`, bounds included
    pub async fn find_near(
        &self,
        date: DateTime<Utc>,
        window_minutes: i64,
    ) -> Result<Vec<entity::session::Model>, DbErr> {
        let window = Duration::minutes(window_minutes);

        entity::prelude::Session::find()
            .filter(entity::session::Column::SessionDate.between(date - window, date + window))
            .all(self.db)
            .await
    }

    /// Gets sessions starting on or after `date`, earliest first
    pub async fn find_from(&self, date: DateTime<Utc>) -> Result<Vec<entity::session::Model>, DbErr> {
        entity::prelude::Session::find()
            .filter(entity::session::Column::SessionDate.gte(date))
            .order_by_asc(entity::session::Column::SessionDate)
            .all(self.db)
            .await
    }

    /// Gets the completed and student-absent sessions held during `month`
    pub async fn find_billable_in_month(
        &self,
        month: &YearMonth,
    ) -> Result<Vec<entity::session::Model>, DbErr> {
        entity::prelude::Session::find()
            .filter(
                entity::session::Column::Status.is_in([STATUS_COMPLETED, STATUS_STUDENT_ABSENT]),
            )
            .filter(entity::session::Column::SessionDate.gte(month.start()))
            .filter(entity::session::Column::SessionDate.lt(month.end()))
            .order_by_asc(entity::session::Column::SessionDate)
            .all(self.db)
            .await
    }

    /// Gets each student id appearing as a session recipient once
    pub async fn distinct_recipients(&self) -> Result<Vec<i64>, DbErr> {
        entity::prelude::Session::find()
            .select_only()
            .column(entity::session::Column::Recipient)
            .distinct()
            .order_by_asc(entity::session::Column::Recipient)
            .into_tuple::<i64>()
            .all(self.db)
            .await
    }

    /// Deletes a session
    ///
    /// Returns OK regardless of the session existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, session_id: i64) -> Result<DeleteResult, DbErr> {
        entity::prelude::Session::delete_by_id(session_id)
            .exec(self.db)
            .await
    }
}
