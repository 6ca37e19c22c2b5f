//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with their extractors, verifying status codes, response
//! bodies and error mapping for each API endpoint.

mod auth;
mod invoice;
mod session;
mod student;
mod webhook;

use mentor_test_utils::prelude::*;

use crate::util::body_json;
