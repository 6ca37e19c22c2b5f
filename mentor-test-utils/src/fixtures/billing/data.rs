//! Billing record insertion utilities.
//!
//! Inserts students, sessions, invoices and the stored platform login built by the
//! factory functions. Rows are inserted as-is; duplicates surface as database errors.

use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    constant::{TEST_ACCESS_TOKEN, TEST_SESSION_COOKIE},
    error::TestError,
    fixtures::{billing::BillingFixtures, factory},
    model::{InvoiceModel, PlatformCookieModel, SessionModel, StudentModel},
};

impl<'a> BillingFixtures<'a> {
    /// Insert a mock student with the given billing status.
    ///
    /// # Returns
    /// - `Ok(StudentModel)` - The inserted student
    /// - `Err(TestError::DbErr)` - Insert failed, e.g. the id is already used
    pub async fn insert_mock_student(
        &self,
        student_id: i64,
        status: &str,
    ) -> Result<StudentModel, TestError> {
        let student = factory::mock_student(student_id, status);

        Ok(
            entity::prelude::Student::insert(entity::student::ActiveModel {
                id: ActiveValue::Set(student.id),
                display_name: ActiveValue::Set(student.display_name),
                email: ActiveValue::Set(student.email),
                first_name: ActiveValue::Set(student.first_name),
                last_name: ActiveValue::Set(student.last_name),
                enrollment: ActiveValue::Set(student.enrollment),
                language: ActiveValue::Set(student.language),
                organization: ActiveValue::Set(student.organization),
                premium: ActiveValue::Set(student.premium),
                identity_locked: ActiveValue::Set(student.identity_locked),
                profile_picture: ActiveValue::Set(student.profile_picture),
                profile_url: ActiveValue::Set(student.profile_url),
                status: ActiveValue::Set(student.status),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a session model, typically built with [`factory::mock_session`].
    pub async fn insert_session(&self, session: SessionModel) -> Result<SessionModel, TestError> {
        Ok(
            entity::prelude::Session::insert(entity::session::ActiveModel {
                id: ActiveValue::Set(session.id),
                recipient: ActiveValue::Set(session.recipient),
                session_date: ActiveValue::Set(session.session_date),
                project_level: ActiveValue::Set(session.project_level),
                session_type: ActiveValue::Set(session.session_type),
                status: ActiveValue::Set(session.status),
                life_cycle_status: ActiveValue::Set(session.life_cycle_status),
                video_conference: ActiveValue::Set(session.video_conference),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert an empty draft invoice for a `YYYY-MM` month.
    pub async fn insert_mock_invoice(&self, month: &str) -> Result<InvoiceModel, TestError> {
        let invoice = factory::mock_invoice(month);

        Ok(
            entity::prelude::Invoice::insert(entity::invoice::ActiveModel {
                id: ActiveValue::Set(invoice.id),
                date: ActiveValue::Set(invoice.date),
                status: ActiveValue::Set(invoice.status),
                total: ActiveValue::Set(invoice.total),
                items: ActiveValue::Set(invoice.items),
                filename: ActiveValue::Set(invoice.filename),
                file: ActiveValue::Set(invoice.file),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert the platform login the mocked endpoints expect.
    ///
    /// Stores [`TEST_SESSION_COOKIE`] and [`TEST_ACCESS_TOKEN`] as if the token route had
    /// been called.
    pub async fn insert_platform_cookie(&self) -> Result<PlatformCookieModel, TestError> {
        Ok(
            entity::prelude::PlatformCookie::insert(entity::platform_cookie::ActiveModel {
                session_id: ActiveValue::Set(TEST_SESSION_COOKIE.to_string()),
                access_token: ActiveValue::Set(TEST_ACCESS_TOKEN.to_string()),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
