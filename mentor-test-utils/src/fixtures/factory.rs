//! Factory functions for models and platform payloads.
//!
//! Pure functions returning in-memory entity models or the JSON the platform would send,
//! filled with standard test values. Nothing here touches the database.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::model::{InvoiceModel, SessionModel, StudentModel};

/// Project level given to sessions that do not specify one.
pub static DEFAULT_PROJECT_LEVEL: &str = "1";

/// Session type given to sessions that do not specify one.
pub static DEFAULT_SESSION_TYPE: &str = "mentoring";

/// A whole hour on a calendar day in UTC.
///
/// # Panics
/// Panics for a date that does not exist
pub fn date(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

/// Email address of the mock student with `student_id`.
pub fn student_email(student_id: i64) -> String {
    format!("student{}@example.com", student_id)
}

/// Display name of the mock student with `student_id`.
pub fn student_display_name(student_id: i64) -> String {
    format!("Student {}", student_id)
}

/// Create a mock student model with the given billing status.
pub fn mock_student(student_id: i64, status: &str) -> StudentModel {
    StudentModel {
        id: student_id,
        display_name: student_display_name(student_id),
        email: student_email(student_id),
        first_name: "Student".to_string(),
        last_name: student_id.to_string(),
        enrollment: "Développeur Web".to_string(),
        language: "fr".to_string(),
        organization: None,
        premium: false,
        identity_locked: false,
        profile_picture: String::new(),
        profile_url: format!("https://example.com/users/{}", student_id),
        status: status.to_string(),
    }
}

/// Create a mock mentoring session at the default project level.
///
/// `status` is used as both the session status and its lifecycle status.
pub fn mock_session(
    session_id: i64,
    recipient: i64,
    session_date: DateTime<Utc>,
    status: &str,
) -> SessionModel {
    mock_session_with(
        session_id,
        recipient,
        session_date,
        DEFAULT_PROJECT_LEVEL,
        DEFAULT_SESSION_TYPE,
        status,
    )
}

/// Create a mock session with an explicit project level and session type.
pub fn mock_session_with(
    session_id: i64,
    recipient: i64,
    session_date: DateTime<Utc>,
    project_level: &str,
    session_type: &str,
    status: &str,
) -> SessionModel {
    SessionModel {
        id: session_id,
        recipient,
        session_date,
        project_level: project_level.to_string(),
        session_type: session_type.to_string(),
        status: status.to_string(),
        life_cycle_status: status.to_string(),
        video_conference: None,
    }
}

/// Create an empty draft invoice for a `YYYY-MM` month.
pub fn mock_invoice(month: &str) -> InvoiceModel {
    InvoiceModel {
        id: format!("OC-{}", month),
        date: month.to_string(),
        status: "Draft".to_string(),
        total: 0.0,
        items: json!([]),
        filename: None,
        file: None,
    }
}

/// A session as listed by the platform, dated with the platform's `+0000` offsets.
pub fn platform_session(
    session_id: i64,
    recipient: i64,
    session_date: DateTime<Utc>,
    status: &str,
) -> Value {
    json!({
        "id": session_id,
        "recipient": { "id": recipient, "displayName": student_display_name(recipient) },
        "sessionDate": session_date.format("%Y-%m-%dT%H:%M:%S%z").to_string(),
        "projectLevel": DEFAULT_PROJECT_LEVEL,
        "type": DEFAULT_SESSION_TYPE,
        "status": status,
        "lifeCycleStatus": status,
        "videoConference": null,
    })
}

/// A user profile as returned by the platform.
pub fn platform_user(student_id: i64) -> Value {
    json!({
        "id": student_id,
        "displayName": student_display_name(student_id),
        "email": student_email(student_id),
        "firstName": "Student",
        "lastName": student_id.to_string(),
        "enrollment": "Développeur Web",
        "language": "fr",
        "organization": null,
        "premium": false,
        "identityLocked": false,
        "profilePicture": "",
        "openClassroomsProfileUrl": format!("https://example.com/users/{}", student_id),
    })
}

/// The mentor identity returned by `/me`.
pub fn platform_identity(user_id: i64, email: &str) -> Value {
    json!({ "id": user_id, "email": email, "displayName": "Mentor" })
}

/// A student dashboard page, with the billing status block when `status` is given.
pub fn student_dashboard(status: Option<&str>) -> String {
    let details = match status {
        Some(status) => format!(
            "<div class=\"mentorshipStudent__details oc-typography-body1\">\n<p>{}</p>\n</div>",
            status
        ),
        None => "<div class=\"mentorshipStudent__empty\"></div>".to_string(),
    };

    format!(
        "<html>\n<body>\n<main>\n{}\n</main>\n</body>\n</html>",
        details
    )
}
