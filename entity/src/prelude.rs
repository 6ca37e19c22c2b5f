pub use super::invoice::Entity as Invoice;
pub use super::platform_cookie::Entity as PlatformCookie;
pub use super::session::Entity as Session;
pub use super::student::Entity as Student;
