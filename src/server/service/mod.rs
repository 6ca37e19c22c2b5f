//! Service layer business logic.
//!
//! Services coordinate between repositories and the learning platform client to implement
//! the operations exposed by the controllers. Pricing and aggregation are pure functions over
//! loaded rows so invoice rules can be tested without a database.

pub mod aggregation;
pub mod auth;
pub mod invoice;
pub mod pricing;
pub mod session;
pub mod student;
