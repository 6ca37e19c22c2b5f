//! Aliases for the entity models fixtures produce.

pub type StudentModel = entity::student::Model;
pub type SessionModel = entity::session::Model;
pub type InvoiceModel = entity::invoice::Model;
pub type PlatformCookieModel = entity::platform_cookie::Model;
