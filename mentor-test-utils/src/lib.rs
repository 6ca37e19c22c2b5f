//! Test harness for the mentor billing crate.
//!
//! Tests declare what they need with [`TestBuilder`]: tables in an in-memory SQLite
//! database, stored students, sessions and invoices, and mocked learning platform endpoints
//! served by mockito. `build()` returns a [`TestContext`] holding the database connection and
//! the mock server, which converts into the application state.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod model;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{
            SELF_FUNDED, TEST_ACCESS_TOKEN, TEST_MENTOR_EMAIL, TEST_MENTOR_ID,
            TEST_SESSION_COOKIE, TEST_USER_AGENT, THIRD_PARTY_FUNDED,
        },
        fixtures::factory,
        TestBuilder, TestContext, TestError,
    };
}
