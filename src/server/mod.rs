//! Server application core modules.
//!
//! This module contains all server-side functionality of the mentor billing service: HTTP
//! routing, authentication against the learning platform, database repositories, invoice
//! pricing and aggregation, and the platform client used to import and book sessions.

#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod platform;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
