use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("Invoice for {0} already exists")]
    AlreadyExists(String),
    #[error("Invoice {0} not found")]
    NotFound(String),
    #[error("Invoice {0} has no attached file")]
    FileMissing(String),
    #[error("Invalid invoice month {0:?}, expected YYYY-MM")]
    InvalidDate(String),
    /// Data integrity error: a session carries a project level without a rate.
    #[error("No rate defined for project level {0:?}")]
    UnknownProjectLevel(String),
    /// Data integrity error: a stored invoice holds unreadable line items or status.
    #[error("Stored invoice {id} is corrupt: {reason}")]
    Corrupt { id: String, reason: String },
}

impl IntoResponse for InvoiceError {
    fn into_response(self) -> Response {
        match self {
            Self::AlreadyExists(_) => {
                tracing::debug!("{}", self);

                error_response(StatusCode::CONFLICT, "Invoice already exist")
            }
            Self::NotFound(_) => {
                tracing::debug!("{}", self);

                error_response(StatusCode::NOT_FOUND, "Invoice not found")
            }
            Self::FileMissing(_) => {
                tracing::debug!("{}", self);

                error_response(StatusCode::NOT_FOUND, "Invoice file not found")
            }
            Self::InvalidDate(_) => error_response(StatusCode::BAD_REQUEST, self.to_string()),
            Self::UnknownProjectLevel(_) | Self::Corrupt { .. } => {
                InternalServerError(self).into_response()
            }
        }
    }
}
