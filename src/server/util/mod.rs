//! Utility functions and helpers for server operations.
//!
//! This module provides reusable helpers for invoice month arithmetic and for splitting
//! paginated platform listings into `Range` header windows. These utilities are used across
//! services and the platform client.

pub mod range;
pub mod time;
