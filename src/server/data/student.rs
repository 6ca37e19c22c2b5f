use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::{model::student::StudentDto, server::data::LIST_LIMIT};

pub struct StudentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StudentRepository<'a, C> {
    /// Creates a new instance of [`StudentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a student
    ///
    /// Returns `None` without writing anything when a student with the same id exists.
    pub async fn create(
        &self,
        student: &StudentDto,
    ) -> Result<Option<entity::student::Model>, DbErr> {
        if self.find_by_id(student.id).await?.is_some() {
            return Ok(None);
        }

        let student = entity::student::ActiveModel {
            id: ActiveValue::Set(student.id),
            display_name: ActiveValue::Set(student.display_name.clone()),
            email: ActiveValue::Set(student.email.clone()),
            first_name: ActiveValue::Set(student.first_name.clone()),
            last_name: ActiveValue::Set(student.last_name.clone()),
            enrollment: ActiveValue::Set(student.enrollment.clone()),
            language: ActiveValue::Set(student.language.clone()),
            organization: ActiveValue::Set(student.organization.clone()),
            premium: ActiveValue::Set(student.premium),
            identity_locked: ActiveValue::Set(student.identity_locked),
            profile_picture: ActiveValue::Set(student.profile_picture.clone()),
            profile_url: ActiveValue::Set(student.profile_url.clone()),
            status: ActiveValue::Set(student.status.clone()),
        };

        Ok(Some(student.insert(self.db).await?))
    }

    pub async fn find_by_id(&self, student_id: i64) -> Result<Option<entity::student::Model>, DbErr> {
        entity::prelude::Student::find_by_id(student_id)
            .one(self.db)
            .await
    }

    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<entity::student::Model>, DbErr> {
        entity::prelude::Student::find()
            .filter(entity::student::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Gets the students among the provided ids, ids without a student are skipped
    pub async fn find_many(&self, student_ids: &[i64]) -> Result<Vec<entity::student::Model>, DbErr> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Student::find()
            .filter(entity::student::Column::Id.is_in(student_ids.iter().copied()))
            .all(self.db)
            .await
    }

    /// Lists students ordered by id, bounded to [`LIST_LIMIT`] rows
    pub async fn list(&self) -> Result<Vec<entity::student::Model>, DbErr> {
        entity::prelude::Student::find()
            .order_by_asc(entity::student::Column::Id)
            .limit(LIST_LIMIT)
            .all(self.db)
            .await
    }

    /// Deletes a student
    ///
    /// Returns OK regardless of the student existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, student_id: i64) -> Result<DeleteResult, DbErr> {
        entity::prelude::Student::delete_by_id(student_id)
            .exec(self.db)
            .await
    }
}
