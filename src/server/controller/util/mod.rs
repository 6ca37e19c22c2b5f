//! Helpers shared by controllers.
//!
//! Authenticated routes extract a [`auth::BearerToken`] and turn it into platform
//! credentials with [`auth::platform_credentials`].

pub mod auth;
