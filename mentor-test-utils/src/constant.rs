//! Constant values shared by fixtures and mocked platform endpoints.
//!
//! None of these are real credentials.

/// User agent for the test platform client.
pub static TEST_USER_AGENT: &str = "mentor-billing-tests/1.0 (contact@example.com)";

/// Platform user id of the mentor the mocked endpoints answer for.
pub const TEST_MENTOR_ID: i64 = 6_700_000;

pub static TEST_MENTOR_EMAIL: &str = "mentor@example.com";

/// Bearer token accepted by the mocked `/me` endpoint.
pub static TEST_ACCESS_TOKEN: &str = "test-access-token";

/// Website session cookie set by the mocked login check.
pub static TEST_SESSION_COOKIE: &str = "test-session-cookie";

/// Cookie set by the mocked login page before credentials are posted.
pub static TEST_LOGIN_PAGE_COOKIE: &str = "test-login-page-cookie";

/// CSRF token returned by the mocked login page.
pub static TEST_CSRF_TOKEN: &str = "test-csrf-token";

/// Billing status shown on the dashboard of a self-funded student.
pub static SELF_FUNDED: &str = "Auto-financé";

/// Billing status shown on the dashboard of a student funded by a third party.
pub static THIRD_PARTY_FUNDED: &str = "Financé par un tiers";
