//! Server application models and type definitions.
//!
//! This module contains data models for the server application, including application state,
//! database model type aliases with their DTO conversions, and the platform credentials that
//! authenticated routes pass to outbound calls.

pub mod app;
pub mod auth;
pub mod db;
