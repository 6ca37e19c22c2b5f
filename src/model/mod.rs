//! Request and response types shared by the HTTP API.

pub mod api;
pub mod auth;
pub mod invoice;
pub mod session;
pub mod student;
pub mod webhook;
