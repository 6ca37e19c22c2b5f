use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::server::{
    error::{auth::AuthError, Error},
    model::{app::AppState, auth::PlatformCredentials},
    service::auth::AuthService,
};

/// Bearer token taken from the `Authorization` header
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| {
                value
                    .strip_prefix("Bearer ")
                    .or_else(|| value.strip_prefix("bearer "))
            })
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingBearerToken)?;

        Ok(Self(token.to_string()))
    }
}

/// Resolves the platform credentials for a request's bearer token
///
/// # Returns
/// - `Ok(PlatformCredentials)`: Token accepted by the platform and a login cookie is stored
/// - `Err(Error::AuthError(AuthError::InvalidToken))`: The platform rejected the token
/// - `Err(Error::AuthError(AuthError::MissingPlatformCookie))`: No platform login recorded yet
/// - `Err(Error)`: Platform request or database failures
pub async fn platform_credentials(
    state: &AppState,
    token: &BearerToken,
) -> Result<PlatformCredentials, Error> {
    AuthService::new(&state.db, &state.platform)
        .stored_credentials(&token.0)
        .await
}

/// Resolves the platform credentials of the stored mentor login
pub async fn stored_platform_credentials(state: &AppState) -> Result<PlatformCredentials, Error> {
    AuthService::new(&state.db, &state.platform)
        .login_credentials()
        .await
}
