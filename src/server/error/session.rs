use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session {0} not found")]
    NotFound(i64),
    #[error("A session already exists around {0}")]
    SlotTaken(DateTime<Utc>),
    #[error("No session found on or after {0}")]
    NoneFrom(DateTime<Utc>),
    #[error("The platform listed no session to import")]
    NothingFetched,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Session not found"),
            Self::SlotTaken(_) => {
                error_response(StatusCode::CONFLICT, "A session exist at the same date")
            }
            Self::NoneFrom(_) => error_response(StatusCode::NOT_FOUND, "No session found"),
            Self::NothingFetched => error_response(StatusCode::NOT_FOUND, "Issue when fetching"),
        }
    }
}
