use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Scheduling event posted by the external booking tool
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SchedulingEventDto {
    pub event: String,
    pub time: String,
    pub payload: SchedulingPayloadDto,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SchedulingPayloadDto {
    pub event: ScheduledEventDto,
    pub invitee: InviteeDto,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ScheduledEventDto {
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct InviteeDto {
    pub name: String,
    pub email: String,
}
