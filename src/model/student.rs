use serde::{Deserialize, Serialize};

/// Full student profile as stored locally
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    pub id: i64,
    pub display_name: String,
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
    #[serde(default)]
    pub profile_url: String,
    /// Billing classification, e.g. `Auto-financé` or `Financé par un tiers`
    pub status: String,
}

/// Student fields returned by lookups
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummaryDto {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    pub status: String,
}

/// Status filters for a student's sessions, each a comma separated list
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct SessionFilterParams {
    #[serde(default)]
    pub include_status: String,
    #[serde(default)]
    pub exclude_status: String,
}
