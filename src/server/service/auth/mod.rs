//! Authentication against the learning platform.
//!
//! The service never issues tokens of its own. Logging in forwards the mentor's credentials
//! to the platform and stores the website session cookie it sets; authenticated routes then
//! check their bearer token against the platform and pair it with that cookie.

use sea_orm::DatabaseConnection;

use crate::{
    model::auth::TokenDto,
    server::{
        data::cookie::CookieRepository,
        error::{auth::AuthError, Error},
        model::auth::{CookieSource, PlatformCredentials},
        platform::PlatformClient,
    },
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    platform: &'a PlatformClient,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection, platform: &'a PlatformClient) -> Self {
        Self { db, platform }
    }

    /// Logs the mentor into the platform and stores the resulting session cookie.
    ///
    /// # Returns
    /// - `Ok(TokenDto)` - Bearer token issued by the platform
    /// - `Err(Error::PlatformError)` - Login refused or the platform omitted a cookie
    /// - `Err(Error::DbErr)` - The session cookie could not be stored
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenDto, Error> {
        let login = self.platform.login(username, password).await?;

        CookieRepository::new(self.db)
            .save(login.session_id, login.access_token.clone())
            .await?;

        tracing::info!("Logged into the learning platform as {}", username);

        Ok(TokenDto {
            access_token: login.access_token,
            token_type: "bearer".to_string(),
        })
    }

    /// Resolves the credentials for a request carrying `token`.
    ///
    /// # Arguments
    /// - `cookies` - Source of the website session cookie
    /// - `token` - Bearer token of the incoming request
    ///
    /// # Returns
    /// - `Ok(PlatformCredentials)` - Mentor identity with token and cookie
    /// - `Err(Error::AuthError(AuthError::InvalidToken))` - The platform rejected the token
    /// - `Err(Error::AuthError(AuthError::MissingPlatformCookie))` - No login has been stored
    pub async fn credentials<S: CookieSource>(
        &self,
        cookies: &S,
        token: &str,
    ) -> Result<PlatformCredentials, Error> {
        let identity = self
            .platform
            .me(token)
            .await?
            .ok_or(AuthError::InvalidToken)?;
        let cookie = cookies
            .session_cookie()
            .await?
            .ok_or(AuthError::MissingPlatformCookie)?;

        Ok(PlatformCredentials {
            user_id: identity.id,
            email: identity.email,
            token: token.to_string(),
            cookie,
        })
    }

    /// Resolves credentials using the stored platform login.
    pub async fn stored_credentials(&self, token: &str) -> Result<PlatformCredentials, Error> {
        self.credentials(&CookieRepository::new(self.db), token).await
    }

    /// Resolves credentials from the stored platform login alone, for callers that carry no
    /// bearer token of their own.
    ///
    /// # Returns
    /// - `Ok(PlatformCredentials)` - Mentor identity with the stored token and cookie
    /// - `Err(Error::AuthError(AuthError::MissingPlatformCookie))` - No login has been stored
    /// - `Err(Error::AuthError(AuthError::InvalidToken))` - The stored token has expired
    pub async fn login_credentials(&self) -> Result<PlatformCredentials, Error> {
        let login = CookieRepository::new(self.db)
            .latest()
            .await?
            .ok_or(AuthError::MissingPlatformCookie)?;

        self.credentials(&login.session_id, &login.access_token).await
    }
}
