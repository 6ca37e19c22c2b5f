//! sea-orm entities for the mentor billing database.

pub mod prelude;

pub mod invoice;
pub mod platform_cookie;
pub mod session;
pub mod student;
