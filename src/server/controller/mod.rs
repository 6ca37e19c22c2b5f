//! HTTP controller endpoints for the mentor billing API.
//!
//! Axum handlers for platform login, students, sessions, invoices and the booking webhook.
//! Controllers extract and validate request inputs, call into services and map results to
//! HTTP responses. Each handler carries a utoipa annotation that feeds the OpenAPI document.

pub mod auth;
pub mod invoice;
pub mod session;
pub mod student;
pub mod util;
pub mod webhook;
