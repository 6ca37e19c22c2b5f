//! Test fixtures for database rows and mocked platform endpoints.
//!
//! - `billing` - Students, sessions, invoices and the stored platform login
//! - `platform` - Platform API and website responses served by mockito
//! - `factory` - Pure functions building models and platform JSON

pub mod billing;
pub mod factory;
pub mod platform;
