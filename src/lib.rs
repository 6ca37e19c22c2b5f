//! Session bookkeeping and monthly invoicing for mentors on a learning platform.
//!
//! Sessions and students are imported from the platform into a local database, and each
//! month's billable sessions are priced into an invoice. The HTTP API is built in
//! [`server::router::routes`].

pub mod model;
pub mod server;
