//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use mockito::Mock;
use serde_json::Value;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, model::SessionModel, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables,
/// billing records, and mocked platform endpoints. Methods can be chained together and
/// finalized with `build()`.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_billing_tables: bool,

    // Database fixtures to insert
    students: Vec<(i64, String)>, // (student_id, billing status)
    sessions: Vec<SessionModel>,
    invoices: Vec<String>, // YYYY-MM months
    platform_cookie: bool,

    // Mock endpoints to create
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    // Pre-configured endpoint shortcuts
    me_endpoints: Vec<usize>,
    sessions_page_endpoints: Vec<(String, Vec<Value>, u64, usize)>, // (range, sessions, total, expected_requests)
    empty_sessions_endpoints: Vec<usize>,
    find_session_endpoints: Vec<(Vec<Value>, usize)>,
    student_endpoints: Vec<(i64, Option<String>, usize)>,
    schedule_endpoints: Vec<(usize, usize)>, // (status, expected_requests)
    cancel_endpoints: Vec<(i64, usize, usize)>, // (session_id, status, expected_requests)
    login_endpoints: Vec<(usize, usize)>,
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables, fixtures, or mock endpoints configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_billing_tables: false,
            students: Vec::new(),
            sessions: Vec::new(),
            invoices: Vec::new(),
            platform_cookie: false,
            mock_builders: Vec::new(),
            me_endpoints: Vec::new(),
            sessions_page_endpoints: Vec::new(),
            empty_sessions_endpoints: Vec::new(),
            find_session_endpoints: Vec::new(),
            student_endpoints: Vec::new(),
            schedule_endpoints: Vec::new(),
            cancel_endpoints: Vec::new(),
            login_endpoints: Vec::new(),
        }
    }

    /// Add every table of the billing database: Student, Session, Invoice and PlatformCookie.
    pub fn with_billing_tables(mut self) -> Self {
        self.include_billing_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mentor_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), mentor_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Student)
    ///     .with_table(Session)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a mock student with the given billing status, see `factory::mock_student`.
    pub fn with_student(mut self, student_id: i64, status: &str) -> Self {
        self.students.push((student_id, status.to_string()));
        self
    }

    /// Insert a session model, see `factory::mock_session`.
    pub fn with_session(mut self, session: SessionModel) -> Self {
        self.sessions.push(session);
        self
    }

    /// Insert an empty draft invoice for a `YYYY-MM` month.
    pub fn with_invoice(mut self, month: &str) -> Self {
        self.invoices.push(month.to_string());
        self
    }

    /// Store the platform login matching the mocked endpoints.
    pub fn with_platform_cookie(mut self) -> Self {
        self.platform_cookie = true;
        self
    }

    /// Add a mock `GET /me` endpoint accepting the test bearer token.
    pub fn with_me_endpoint(mut self, expected_requests: usize) -> Self {
        self.me_endpoints.push(expected_requests);
        self
    }

    /// Add a mock page of the mentor's session listing.
    ///
    /// # Arguments
    /// - `range` - Expected `Range` header, e.g. `items=0-19`
    /// - `sessions` - Page content, see `factory::platform_session`
    /// - `total` - Total number of sessions across all pages
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn with_sessions_page_endpoint(
        mut self,
        range: &str,
        sessions: Vec<Value>,
        total: u64,
        expected_requests: usize,
    ) -> Self {
        self.sessions_page_endpoints
            .push((range.to_string(), sessions, total, expected_requests));
        self
    }

    /// Add a mock session listing with no sessions at all.
    pub fn with_empty_sessions_endpoint(mut self, expected_requests: usize) -> Self {
        self.empty_sessions_endpoints.push(expected_requests);
        self
    }

    /// Add a mock lookup of the pending session created by a booking.
    pub fn with_find_session_endpoint(
        mut self,
        sessions: Vec<Value>,
        expected_requests: usize,
    ) -> Self {
        self.find_session_endpoints
            .push((sessions, expected_requests));
        self
    }

    /// Add mock dashboard and profile endpoints for a student.
    ///
    /// `billing_status` is shown on the dashboard; `None` leaves the status block out.
    pub fn with_student_endpoints(
        mut self,
        student_id: i64,
        billing_status: Option<&str>,
        expected_requests: usize,
    ) -> Self {
        self.student_endpoints.push((
            student_id,
            billing_status.map(str::to_string),
            expected_requests,
        ));
        self
    }

    /// Add a mock booking endpoint answering with `status`.
    pub fn with_schedule_endpoint(mut self, status: usize, expected_requests: usize) -> Self {
        self.schedule_endpoints.push((status, expected_requests));
        self
    }

    /// Add a mock cancellation endpoint for a session answering with `status`.
    pub fn with_cancel_endpoint(
        mut self,
        session_id: i64,
        status: usize,
        expected_requests: usize,
    ) -> Self {
        self.cancel_endpoints
            .push((session_id, status, expected_requests));
        self
    }

    /// Add mock login page and login check endpoints, the check answering with `status`.
    pub fn with_login_endpoints(mut self, status: usize, expected_requests: usize) -> Self {
        self.login_endpoints.push((status, expected_requests));
        self
    }

    /// Add a custom mock endpoint with full control.
    ///
    /// Allows complete customization of mock endpoint behavior by providing direct access
    /// to the mockito ServerGuard. Use this for endpoints not covered by helper methods.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test context by creating all configured tables, fixtures, and mock endpoints.
    ///
    /// Executes all queued operations in the following order:
    /// 1. Creates database tables (billing tables if specified, then custom tables)
    /// 2. Inserts database fixtures (students, sessions, invoices, platform login)
    /// 3. Creates mock HTTP endpoints (custom endpoints first, then platform shortcuts)
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_billing_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Student),
                schema.create_table_from_entity(entity::prelude::Session),
                schema.create_table_from_entity(entity::prelude::Invoice),
                schema.create_table_from_entity(entity::prelude::PlatformCookie),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for (student_id, status) in self.students {
            setup
                .billing()
                .insert_mock_student(student_id, &status)
                .await?;
        }

        for session in self.sessions {
            setup.billing().insert_session(session).await?;
        }

        for month in self.invoices {
            setup.billing().insert_mock_invoice(&month).await?;
        }

        if self.platform_cookie {
            setup.billing().insert_platform_cookie().await?;
        }

        // 3. Create mock endpoints
        // Custom endpoints come first so tests can stack mocks on the same path
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for expected in self.me_endpoints {
            mocks.push(setup.platform().create_me_endpoint(expected));
        }

        for (range, sessions, total, expected) in self.sessions_page_endpoints {
            mocks.push(
                setup
                    .platform()
                    .create_sessions_page_endpoint(&range, sessions, total, expected),
            );
        }

        for expected in self.empty_sessions_endpoints {
            mocks.push(setup.platform().create_empty_sessions_endpoint(expected));
        }

        for (sessions, expected) in self.find_session_endpoints {
            mocks.push(
                setup
                    .platform()
                    .create_find_session_endpoint(sessions, expected),
            );
        }

        for (student_id, status, expected) in self.student_endpoints {
            mocks.extend(setup.platform().create_student_endpoints(
                student_id,
                status.as_deref(),
                expected,
            ));
        }

        for (status, expected) in self.schedule_endpoints {
            mocks.push(setup.platform().create_schedule_endpoint(status, expected));
        }

        for (session_id, status, expected) in self.cancel_endpoints {
            mocks.push(
                setup
                    .platform()
                    .create_cancel_endpoint(session_id, status, expected),
            );
        }

        for (status, expected) in self.login_endpoints {
            mocks.extend(setup.platform().create_login_endpoints(status, expected));
        }

        // Store mocks in the context so they live as long as the test
        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
