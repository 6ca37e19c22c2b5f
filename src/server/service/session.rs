//! Session synchronisation, scheduling and cancellation.
//!
//! Sessions live on the learning platform; the local table is a copy used for invoicing.
//! Synchronising imports the sessions not seen before along with any student they mention.
//! Scheduling books on the platform and then stores the session the platform created.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::session::{SessionDto, STATUS_PENDING},
    server::{
        data::{session::SessionRepository, student::StudentRepository},
        error::{platform::PlatformError, session::SessionError, Error},
        model::auth::PlatformCredentials,
        platform::PlatformClient,
    },
};

/// Minutes on either side of a requested date in which no other session may be stored.
pub const SCHEDULE_CONFLICT_WINDOW_MINUTES: i64 = 60;

pub struct SessionService<'a> {
    db: &'a DatabaseConnection,
    platform: &'a PlatformClient,
}

impl<'a> SessionService<'a> {
    /// Creates a new instance of [`SessionService`]
    pub fn new(db: &'a DatabaseConnection, platform: &'a PlatformClient) -> Self {
        Self { db, platform }
    }

    pub async fn get(&self, session_id: i64) -> Result<Option<SessionDto>, Error> {
        let session = SessionRepository::new(self.db).find_by_id(session_id).await?;

        Ok(session.map(SessionDto::from))
    }

    /// Imports the mentor's sessions from the platform.
    ///
    /// Sessions already stored are left untouched. Afterwards, every session recipient
    /// without a stored student is fetched from the platform and stored.
    ///
    /// # Returns
    /// - `Ok(Vec<SessionDto>)` - The sessions stored by this call
    /// - `Err(Error::SessionError(SessionError::NothingFetched))` - The platform listed nothing
    /// - `Err(Error::PlatformError)` - A platform request failed
    /// - `Err(Error::DbErr)` - A database operation failed
    pub async fn sync(&self, credentials: &PlatformCredentials) -> Result<Vec<SessionDto>, Error> {
        let session_repo = SessionRepository::new(self.db);
        let student_repo = StudentRepository::new(self.db);

        let fetched = self.platform.all_sessions(credentials).await?;
        if fetched.is_empty() {
            return Err(SessionError::NothingFetched.into());
        }

        let mut imported = Vec::new();
        for session in fetched {
            if let Some(created) = session_repo.create(&session).await? {
                imported.push(SessionDto::from(created));
            }
        }

        let recipients = session_repo.distinct_recipients().await?;
        let known: Vec<i64> = student_repo
            .find_many(&recipients)
            .await?
            .into_iter()
            .map(|student| student.id)
            .collect();

        let mut new_students = 0;
        for student_id in recipients.into_iter().filter(|id| !known.contains(id)) {
            let student = self.platform.student(credentials, student_id).await?;
            if student_repo.create(&student).await?.is_some() {
                new_students += 1;
            }
        }

        tracing::info!(
            "Imported {} sessions and {} students from the platform",
            imported.len(),
            new_students
        );

        Ok(imported)
    }

    /// Books a session with a student and stores it.
    ///
    /// # Returns
    /// - `Ok(SessionDto)` - The session created by the platform
    /// - `Err(Error::SessionError(SessionError::SlotTaken))` - A stored session starts within
    ///   [`SCHEDULE_CONFLICT_WINDOW_MINUTES`] of the date
    /// - `Err(Error::PlatformError(PlatformError::Upstream))` - The platform refused the booking
    /// - `Err(Error::PlatformError(PlatformError::SessionNotListed))` - The booking was accepted
    ///   but the platform does not list the new session
    pub async fn schedule(
        &self,
        credentials: &PlatformCredentials,
        student_id: i64,
        session_date: DateTime<Utc>,
    ) -> Result<SessionDto, Error> {
        let session_repo = SessionRepository::new(self.db);

        if !session_repo
            .find_near(session_date, SCHEDULE_CONFLICT_WINDOW_MINUTES)
            .await?
            .is_empty()
        {
            return Err(SessionError::SlotTaken(session_date).into());
        }

        self.platform
            .schedule_session(credentials, student_id, session_date)
            .await?;

        let session = self
            .platform
            .find_session(credentials, STATUS_PENDING, session_date)
            .await?
            .ok_or(PlatformError::SessionNotListed(session_date))?;

        session_repo.create(&session).await?;

        tracing::info!(
            "Scheduled session {} with student {} at {}",
            session.id,
            student_id,
            session_date
        );

        Ok(session)
    }

    /// Cancels a session on the platform and removes the stored copy.
    ///
    /// Cancellation is requested even when the session is not stored locally.
    /// Returns whether the platform accepted the cancellation.
    pub async fn cancel(
        &self,
        credentials: &PlatformCredentials,
        session_id: i64,
    ) -> Result<bool, Error> {
        let deleted = SessionRepository::new(self.db).delete(session_id).await?;
        if deleted.rows_affected == 0 {
            tracing::debug!("Session {} is not stored, cancelling on platform only", session_id);
        }

        Ok(self.platform.cancel_session(credentials, session_id).await?)
    }

    /// Cancels every stored session starting on or after `from`.
    ///
    /// Only sessions the platform cancelled are removed locally.
    ///
    /// # Returns
    /// - `Ok(Vec<SessionDto>)` - The cancelled sessions
    /// - `Err(Error::SessionError(SessionError::NoneFrom))` - No stored session on or after `from`
    pub async fn cancel_from(
        &self,
        credentials: &PlatformCredentials,
        from: DateTime<Utc>,
    ) -> Result<Vec<SessionDto>, Error> {
        let session_repo = SessionRepository::new(self.db);

        let sessions = session_repo.find_from(from).await?;
        if sessions.is_empty() {
            return Err(SessionError::NoneFrom(from).into());
        }

        let mut cancelled = Vec::new();
        for session in sessions {
            if self.platform.cancel_session(credentials, session.id).await? {
                session_repo.delete(session.id).await?;
                cancelled.push(SessionDto::from(session));
            } else {
                tracing::warn!("Platform refused to cancel session {}, keeping it", session.id);
            }
        }

        Ok(cancelled)
    }
}

#[cfg(test)]
mod tests {
    mod sync {
        use mentor_test_utils::prelude::*;

        use crate::server::{
            data::{session::SessionRepository, student::StudentRepository},
            error::{session::SessionError, Error},
            model::app::AppState,
            service::session::SessionService,
            util::test::test_credentials,
        };

        /// Expect new sessions and their unknown students to be stored
        #[tokio::test]
        async fn imports_sessions_and_students() -> Result<(), TestError> {
            let page = vec![
                factory::platform_session(1, 7, factory::date(2022, 3, 1, 9), "completed"),
                factory::platform_session(2, 8, factory::date(2022, 3, 2, 9), "completed"),
            ];
            let test = TestBuilder::new()
                .with_billing_tables()
                .with_student(8, THIRD_PARTY_FUNDED)
                .with_sessions_page_endpoint("items=0-19", page, 2, 1)
                .with_student_endpoints(7, Some(SELF_FUNDED), 1)
                .build()
                .await?;

            let state: AppState = test.to_app_state();
            let session_service = SessionService::new(&state.db, &state.platform);
            let imported = session_service
                .sync(&test_credentials())
                .await
                .expect("sync should succeed");

            assert_eq!(imported.len(), 2);
            let student = StudentRepository::new(&state.db).find_by_id(7).await?.unwrap();
            assert_eq!(student.status, SELF_FUNDED);
            test.assert_mocks();

            Ok(())
        }

        /// Expect already stored sessions not to be returned or modified
        #[tokio::test]
        async fn skips_known_sessions() -> Result<(), TestError> {
            let page = vec![
                factory::platform_session(1, 7, factory::date(2022, 3, 1, 9), "completed"),
                factory::platform_session(2, 7, factory::date(2022, 3, 2, 9), "completed"),
            ];
            let test = TestBuilder::new()
                .with_billing_tables()
                .with_student(7, SELF_FUNDED)
                .with_session(factory::mock_session(1, 7, factory::date(2022, 3, 1, 9), "pending"))
                .with_sessions_page_endpoint("items=0-19", page, 2, 1)
                .build()
                .await?;

            let state: AppState = test.to_app_state();
            let session_service = SessionService::new(&state.db, &state.platform);
            let imported = session_service
                .sync(&test_credentials())
                .await
                .expect("sync should succeed");

            assert_eq!(imported.len(), 1);
            assert_eq!(imported[0].id, 2);
            let kept = SessionRepository::new(&state.db).find_by_id(1).await?.unwrap();
            assert_eq!(kept.status, "pending");

            Ok(())
        }

        /// Expect NotFound when the platform lists no session at all
        #[tokio::test]
        async fn fails_on_empty_listing() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_billing_tables()
                .with_empty_sessions_endpoint(1)
                .build()
                .await?;

            let state: AppState = test.to_app_state();
            let session_service = SessionService::new(&state.db, &state.platform);
            let result = session_service.sync(&test_credentials()).await;

            assert!(matches!(
                result,
                Err(Error::SessionError(SessionError::NothingFetched))
            ));
            test.assert_mocks();

            Ok(())
        }
    }

    mod schedule {
        use mentor_test_utils::prelude::*;

        use crate::server::{
            data::session::SessionRepository,
            error::{platform::PlatformError, session::SessionError, Error},
            model::app::AppState,
            service::session::SessionService,
            util::test::test_credentials,
        };

        /// Expect the session listed by the platform to be stored and returned
        #[tokio::test]
        async fn stores_booked_session() -> Result<(), TestError> {
            let date = factory::date(2022, 3, 4, 10);
            let test = TestBuilder::new()
                .with_billing_tables()
                .with_schedule_endpoint(201, 1)
                .with_find_session_endpoint(
                    vec![factory::platform_session(55, 7, date, "pending")],
                    1,
                )
                .build()
                .await?;

            let state: AppState = test.to_app_state();
            let session_service = SessionService::new(&state.db, &state.platform);
            let session = session_service
                .schedule(&test_credentials(), 7, date)
                .await
                .expect("scheduling should succeed");

            assert_eq!(session.id, 55);
            assert!(SessionRepository::new(&state.db).find_by_id(55).await?.is_some());
            test.assert_mocks();

            Ok(())
        }

        /// Expect Conflict without contacting the platform when the slot is taken
        #[tokio::test]
        async fn rejects_taken_slot() -> Result<(), TestError> {
            let date = factory::date(2022, 3, 4, 10);
            let test = TestBuilder::new()
                .with_billing_tables()
                .with_session(factory::mock_session(
                    1,
                    7,
                    date + chrono::Duration::minutes(30),
                    "pending",
                ))
                .with_schedule_endpoint(201, 0)
                .build()
                .await?;

            let state: AppState = test.to_app_state();
            let session_service = SessionService::new(&state.db, &state.platform);
            let result = session_service.schedule(&test_credentials(), 8, date).await;

            assert!(matches!(
                result,
                Err(Error::SessionError(SessionError::SlotTaken(_)))
            ));
            test.assert_mocks();

            Ok(())
        }

        /// Expect an upstream failure when the booked session is not listed
        #[tokio::test]
        async fn fails_when_booking_is_not_listed() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_billing_tables()
                .with_schedule_endpoint(201, 1)
                .with_find_session_endpoint(Vec::new(), 1)
                .build()
                .await?;

            let state: AppState = test.to_app_state();
            let session_service = SessionService::new(&state.db, &state.platform);
            let result = session_service
                .schedule(&test_credentials(), 7, factory::date(2022, 3, 4, 10))
                .await;

            assert!(matches!(
                result,
                Err(Error::PlatformError(PlatformError::SessionNotListed(_)))
            ));

            Ok(())
        }
    }

    mod cancel {
        use mentor_test_utils::prelude::*;

        use crate::server::{
            data::session::SessionRepository,
            error::{session::SessionError, Error},
            model::app::AppState,
            service::session::SessionService,
            util::test::test_credentials,
        };

        /// Expect only sessions cancelled by the platform to be removed
        #[tokio::test]
        async fn removes_only_cancelled_sessions() -> Result<(), TestError> {
            let from = factory::date(2022, 3, 4, 0);
            let test = TestBuilder::new()
                .with_billing_tables()
                .with_session(factory::mock_session(1, 7, factory::date(2022, 3, 3, 9), "pending"))
                .with_session(factory::mock_session(2, 7, factory::date(2022, 3, 5, 9), "pending"))
                .with_session(factory::mock_session(3, 7, factory::date(2022, 3, 6, 9), "pending"))
                .with_cancel_endpoint(2, 200, 1)
                .with_cancel_endpoint(3, 403, 1)
                .build()
                .await?;

            let state: AppState = test.to_app_state();
            let session_service = SessionService::new(&state.db, &state.platform);
            let cancelled = session_service
                .cancel_from(&test_credentials(), from)
                .await
                .expect("cancellation should succeed");

            assert_eq!(cancelled.len(), 1);
            assert_eq!(cancelled[0].id, 2);
            let session_repo = SessionRepository::new(&state.db);
            assert!(session_repo.find_by_id(1).await?.is_some());
            assert!(session_repo.find_by_id(2).await?.is_none());
            assert!(session_repo.find_by_id(3).await?.is_some());
            test.assert_mocks();

            Ok(())
        }

        /// Expect NotFound when no session starts on or after the date
        #[tokio::test]
        async fn fails_when_nothing_to_cancel() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_billing_tables()
                .with_session(factory::mock_session(1, 7, factory::date(2022, 3, 3, 9), "pending"))
                .build()
                .await?;

            let state: AppState = test.to_app_state();
            let session_service = SessionService::new(&state.db, &state.platform);
            let result = session_service
                .cancel_from(&test_credentials(), factory::date(2022, 3, 4, 0))
                .await;

            assert!(matches!(
                result,
                Err(Error::SessionError(SessionError::NoneFrom(_)))
            ));

            Ok(())
        }

        /// Expect the platform to be asked even for a session that is not stored
        #[tokio::test]
        async fn cancels_unknown_session_on_platform() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_billing_tables()
                .with_cancel_endpoint(9, 200, 1)
                .build()
                .await?;

            let state: AppState = test.to_app_state();
            let session_service = SessionService::new(&state.db, &state.platform);
            let result = session_service.cancel(&test_credentials(), 9).await;

            assert!(matches!(result, Ok(true)));
            test.assert_mocks();

            Ok(())
        }
    }
}
