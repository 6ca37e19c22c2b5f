//! Test context structure and utilities.
//!
//! The `TestContext` returned by `TestBuilder` holds an in-memory SQLite database and the
//! mockito server standing in for the learning platform, along with the mocks created for
//! the test so their call counts can be asserted.

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

/// Test context structure returned by `TestBuilder`
///
/// # Usage
///
/// ```ignore
/// let test = TestBuilder::new().with_billing_tables().build().await?;
///
/// // Access the database
/// let db = &test.db;
///
/// // Build the application state against the mock platform
/// let state: AppState = test.to_app_state();
///
/// // Assert all mocks were called
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,

    /// Mock HTTP server for the platform API and website
    pub(crate) server: ServerGuard,
    /// Collection of mock HTTP endpoints for assertion
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Convert the database and mock server URL into any type that can be constructed from them
    ///
    /// The mock server serves both the platform API and website. This allows conversion to
    /// AppState without the test-utils crate depending on the main crate.
    ///
    /// ```ignore
    /// let app_state: AppState = test.to_app_state();
    /// ```
    pub fn to_app_state<T>(&self) -> T
    where
        T: From<(DatabaseConnection, String)>,
    {
        T::from((self.db.clone(), self.server_url()))
    }

    /// Base URL of the mock platform server
    pub fn server_url(&self) -> String {
        self.server.url()
    }

    /// Create a new test context.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - In-memory database and mock server ready for use
    /// - `Err(TestError::DbErr)` - Database connection failed
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            server,
            mocks: Vec::new(),
        })
    }

    /// Executes CREATE TABLE statements for all provided table schemas.
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
