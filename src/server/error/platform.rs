use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

/// Failures talking to the learning platform. None of them are retried.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The platform answered with a status the operation does not accept.
    #[error("Platform request to {url} returned {status}: {body}")]
    Upstream {
        url: String,
        status: u16,
        body: String,
    },
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error("Could not encode platform request: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Platform response did not set the {0} cookie")]
    MissingCookie(&'static str),
    #[error("Invalid Content-Range header: {0:?}")]
    InvalidContentRange(String),
    /// Data integrity error: the dashboard status block was present but empty.
    #[error("Could not read billing status for student {0}")]
    UnparseableStudentStatus(i64),
    #[error("Scheduled session at {0} was not listed by the platform")]
    SessionNotListed(DateTime<Utc>),
}

impl IntoResponse for PlatformError {
    fn into_response(self) -> Response {
        match self {
            Self::Upstream { status, body, .. } => {
                tracing::warn!(status = %status, "Platform request failed: {}", body);

                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                error_response(status, body)
            }
            Self::UnparseableStudentStatus(_) | Self::Encode(_) => {
                InternalServerError(self).into_response()
            }
            err => {
                tracing::error!("{}", err);

                error_response(StatusCode::BAD_GATEWAY, "Learning platform request failed")
            }
        }
    }
}
