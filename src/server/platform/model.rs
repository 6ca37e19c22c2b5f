//! Wire types of the learning platform.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::model::{session::SessionDto, student::StudentDto};

/// Timestamp format of the platform, an offset without colon such as `+0000`.
const PLATFORM_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Formats a timestamp the way the platform writes them.
pub fn format_platform_date(date: DateTime<Utc>) -> String {
    date.format(PLATFORM_DATE_FORMAT).to_string()
}

/// Parses RFC 3339 timestamps as well as the platform's `+0000` offsets.
pub fn parse_platform_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, PLATFORM_DATE_FORMAT))
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

fn deserialize_platform_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;

    parse_platform_date(&value)
        .ok_or_else(|| de::Error::custom(format!("invalid session date {:?}", value)))
}

/// Project levels are sent either as strings or as numbers.
fn deserialize_level<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(level) => Ok(level),
        serde_json::Value::Number(level) => Ok(level.to_string()),
        other => Err(de::Error::custom(format!("invalid project level {}", other))),
    }
}

/// Identity returned by `GET /me`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformIdentity {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformRecipient {
    pub id: i64,
}

/// A session as listed by the platform.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSession {
    pub id: i64,
    pub recipient: PlatformRecipient,
    #[serde(deserialize_with = "deserialize_platform_date")]
    pub session_date: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_level")]
    pub project_level: String,
    #[serde(rename = "type")]
    pub session_type: String,
    pub status: String,
    #[serde(default)]
    pub life_cycle_status: String,
    #[serde(default)]
    pub video_conference: Option<String>,
}

/// Flattens the recipient to its id.
impl From<PlatformSession> for SessionDto {
    fn from(session: PlatformSession) -> Self {
        Self {
            id: session.id,
            recipient: session.recipient.id,
            session_date: session.session_date,
            project_level: session.project_level,
            session_type: session.session_type,
            status: session.status,
            life_cycle_status: session.life_cycle_status,
            video_conference: session.video_conference,
        }
    }
}

/// A user profile as returned by `GET /users/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformUser {
    pub id: i64,
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub enrollment: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub premium: bool,
    #[serde(default)]
    pub identity_locked: bool,
    #[serde(default)]
    pub profile_picture: String,
    #[serde(default, alias = "openClassroomsProfileUrl")]
    pub profile_url: String,
}

impl PlatformUser {
    /// Combines the profile with the billing status scraped from the student dashboard.
    pub fn into_student(self, status: String) -> StudentDto {
        StudentDto {
            id: self.id,
            display_name: self.display_name,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            enrollment: self.enrollment,
            language: self.language,
            organization: self.organization,
            premium: self.premium,
            identity_locked: self.identity_locked,
            profile_picture: self.profile_picture,
            profile_url: self.profile_url,
            status,
        }
    }
}

/// Response of the login page, carrying the token for the credential check.
#[derive(Debug, Deserialize)]
pub struct LoginPage {
    pub csrf: String,
}

/// Cookies set by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformLogin {
    pub session_id: String,
    pub access_token: String,
}

/// Body of a schedule request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub student_id: i64,
    pub mentor_id: i64,
    pub session_date: String,
    pub is_defense: bool,
}

/// Body of a cancel request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    pub late: bool,
    pub student_facing_note: Option<String>,
}

/// One page of the session listing.
#[derive(Debug, Default)]
pub struct SessionPage {
    pub sessions: Vec<PlatformSession>,
    /// Total number of sessions across all pages
    pub total: u64,
}
