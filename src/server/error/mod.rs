//! Error types for the mentor billing server.
//!
//! Each domain (configuration, authentication, invoices, students, sessions, the learning
//! platform) has its own `thiserror` enum that knows how to render itself as an HTTP
//! response. [`Error`] aggregates them together with library errors so services can use
//! the `?` operator throughout, and controllers can return it directly from handlers.

pub mod auth;
pub mod config;
pub mod invoice;
pub mod platform;
pub mod session;
pub mod student;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, invoice::InvoiceError, platform::PlatformError,
        session::SessionError, student::StudentError,
    },
};

/// Main error type for the mentor billing server.
///
/// Domain errors convert into HTTP responses with their own status codes; library errors
/// are treated as internal server errors and logged without leaking details to clients.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Bearer token or platform session problem.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Invoice lifecycle error (conflict, not found, data integrity).
    #[error(transparent)]
    InvoiceError(#[from] InvoiceError),
    /// Student lookup or creation error.
    #[error(transparent)]
    StudentError(#[from] StudentError),
    /// Session lookup, scheduling or cancellation error.
    #[error(transparent)]
    SessionError(#[from] SessionError),
    /// The learning platform rejected a request or returned something unexpected.
    #[error(transparent)]
    PlatformError(#[from] PlatformError),
    /// Parse error for client supplied values.
    #[error("Failed to parse value: {0}")]
    ParseError(String),
    /// Internal error indicating a bug in the server code.
    #[error("Internal error: {0}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Stored JSON could not be (de)serialized.
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    /// Malformed multipart upload.
    #[error(transparent)]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Unparseable client input or malformed uploads
/// - 401 Unauthorized - Missing or rejected bearer token
/// - 404 Not Found - Missing invoices, students or sessions
/// - 409 Conflict - Invoice, student or session slot already exists
/// - Upstream status - The learning platform refused a request
/// - 500 Internal Server Error - Everything else (logged)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::InvoiceError(err) => err.into_response(),
            Self::StudentError(err) => err.into_response(),
            Self::SessionError(err) => err.into_response(),
            Self::PlatformError(err) => err.into_response(),
            Self::ParseError(message) => {
                tracing::debug!("{}", message);

                error_response(StatusCode::BAD_REQUEST, message)
            }
            Self::Multipart(err) => {
                tracing::debug!("{}", err);

                error_response(StatusCode::BAD_REQUEST, err.body_text())
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds a JSON error response with the provided status code and message.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic message to the client to avoid leaking
/// implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
