use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Request does not carry a bearer token")]
    MissingBearerToken,
    #[error("Bearer token was rejected by the platform")]
    InvalidToken,
    #[error("No platform session cookie is stored, a login is required")]
    MissingPlatformCookie,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let message = match self {
            Self::MissingBearerToken | Self::InvalidToken => "Could not validate credentials",
            Self::MissingPlatformCookie => "Platform session expired, please log in again",
        };

        let mut response = error_response(StatusCode::UNAUTHORIZED, message);
        response.headers_mut().insert(
            header::WWW_AUTHENTICATE,
            header::HeaderValue::from_static("Bearer"),
        );

        response
    }
}
