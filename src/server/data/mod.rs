//! Data access layer repositories.
//!
//! This module contains the database repositories of the application. Repositories are
//! generic over [`sea_orm::ConnectionTrait`] so the same queries run against the connection
//! pool or inside a transaction. Lookups return `Option` and deletes return the
//! [`sea_orm::DeleteResult`]; deciding what a missing row means is left to the services.

pub mod cookie;
pub mod invoice;
pub mod session;
pub mod student;

/// Upper bound on rows returned by listing queries.
pub const LIST_LIMIT: u64 = 100;
