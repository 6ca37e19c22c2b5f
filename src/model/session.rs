use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a session that was held
pub const STATUS_COMPLETED: &str = "completed";
/// Lifecycle status of a session the student did not attend
pub const STATUS_STUDENT_ABSENT: &str = "marked student as absent";
/// Lifecycle status of a session that is scheduled but not yet held
pub const STATUS_PENDING: &str = "pending";

/// Session type billed with the self-funded discount
pub const TYPE_MENTORING: &str = "mentoring";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub id: i64,
    /// Platform id of the student
    pub recipient: i64,
    pub session_date: DateTime<Utc>,
    pub project_level: String,
    #[serde(rename = "type")]
    pub session_type: String,
    pub status: String,
    pub life_cycle_status: String,
    pub video_conference: Option<String>,
}

/// Body of a schedule request
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSessionDto {
    pub student_id: i64,
    pub session_date: DateTime<Utc>,
}

/// Query parameter carrying a session date
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SessionDateParams {
    pub session_date: DateTime<Utc>,
}
