use sea_orm::DatabaseConnection;

use crate::{
    model::{session::SessionDto, student::{StudentDto, StudentSummaryDto}},
    server::{
        data::{session::SessionRepository, student::StudentRepository},
        error::{student::StudentError, Error},
    },
};

/// Service for the locally stored students.
pub struct StudentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StudentService<'a> {
    /// Creates a new instance of [`StudentService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a student.
    ///
    /// # Returns
    /// - `Ok(StudentDto)` - The stored student
    /// - `Err(Error::StudentError(StudentError::AlreadyExists))` - The id is already stored
    pub async fn create(&self, student: StudentDto) -> Result<StudentDto, Error> {
        match StudentRepository::new(self.db).create(&student).await? {
            Some(created) => Ok(created.into()),
            None => Err(StudentError::AlreadyExists(student.id).into()),
        }
    }

    pub async fn get(&self, student_id: i64) -> Result<Option<StudentSummaryDto>, Error> {
        let student = StudentRepository::new(self.db).find_by_id(student_id).await?;

        Ok(student.map(StudentSummaryDto::from))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<StudentSummaryDto>, Error> {
        let student = StudentRepository::new(self.db).find_by_email(email).await?;

        Ok(student.map(StudentSummaryDto::from))
    }

    pub async fn list(&self) -> Result<Vec<StudentSummaryDto>, Error> {
        let students = StudentRepository::new(self.db).list().await?;

        Ok(students.into_iter().map(StudentSummaryDto::from).collect())
    }

    /// Deletes a student, returns whether a student was removed
    pub async fn delete(&self, student_id: i64) -> Result<bool, Error> {
        let result = StudentRepository::new(self.db).delete(student_id).await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets the sessions of a student filtered by status.
    ///
    /// # Arguments
    /// - `include_status` - Comma separated statuses to keep, all when empty
    /// - `exclude_status` - Comma separated statuses to leave out
    pub async fn sessions(
        &self,
        student_id: i64,
        include_status: &str,
        exclude_status: &str,
    ) -> Result<Vec<SessionDto>, Error> {
        let sessions = SessionRepository::new(self.db)
            .find_by_recipient(
                student_id,
                &split_statuses(include_status),
                &split_statuses(exclude_status),
            )
            .await?;

        Ok(sessions.into_iter().map(SessionDto::from).collect())
    }
}

fn split_statuses(statuses: &str) -> Vec<String> {
    statuses
        .split(',')
        .map(str::trim)
        .filter(|status| !status.is_empty())
        .map(str::to_string)
        .collect()
}
