use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum StudentError {
    #[error("Student {0} already exists")]
    AlreadyExists(i64),
    #[error("Student {0} not found")]
    NotFound(i64),
    #[error("No student registered with email {0}")]
    EmailNotFound(String),
}

impl IntoResponse for StudentError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::AlreadyExists(_) => error_response(StatusCode::CONFLICT, "Student already exist"),
            Self::NotFound(_) | Self::EmailNotFound(_) => {
                error_response(StatusCode::NOT_FOUND, "Student not found")
            }
        }
    }
}
