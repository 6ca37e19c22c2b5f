//! Credentials for calls made on behalf of the mentor.
//!
//! Outbound platform calls need two things: the bearer token of the request being served and
//! the website session cookie captured at login. Both are bundled into [`PlatformCredentials`]
//! and passed explicitly to every call rather than read from shared state.

use std::future::Future;

use sea_orm::DbErr;

/// Identity and secrets used for one request against the learning platform.
#[derive(Clone, Debug)]
pub struct PlatformCredentials {
    /// Platform user id of the mentor
    pub user_id: i64,
    pub email: String,
    /// Bearer token for the platform API
    pub token: String,
    /// Website session cookie (`PHPSESSID`)
    pub cookie: String,
}

/// Provides the website session cookie to combine with a bearer token.
///
/// The stored cookie row implements this in production; tests and alternative refresh
/// strategies can supply their own.
pub trait CookieSource {
    /// Returns the current session cookie, or `None` when no login has been recorded.
    fn session_cookie(&self) -> impl Future<Output = Result<Option<String>, DbErr>> + Send;
}

/// A fixed cookie value.
impl CookieSource for String {
    fn session_cookie(&self) -> impl Future<Output = Result<Option<String>, DbErr>> + Send {
        let cookie = self.clone();

        async move { Ok(Some(cookie)) }
    }
}
