use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{api::ErrorDto, session::SessionDto, webhook::SchedulingEventDto},
    server::{
        controller::util::auth::stored_platform_credentials,
        error::{student::StudentError, Error},
        model::app::AppState,
        service::{session::SessionService, student::StudentService},
    },
};

pub static WEBHOOK_TAG: &str = "webhook";

/// Schedule a session booked through the external booking tool
///
/// Resolves the invitee to a stored student by email and schedules a session at the booked
/// start time. The booking tool sends no credentials, the stored mentor login is used.
///
/// # Responses
/// - 201 (Created): Session booked on the platform and stored
/// - 401 (Unauthorized): No platform login stored, or its token expired
/// - 404 (Not Found): No stored student has the invitee's email
/// - 409 (Conflict): A stored session starts within an hour of the booked time
#[utoipa::path(
    post,
    path = "/webhook/session",
    tag = WEBHOOK_TAG,
    request_body = SchedulingEventDto,
    responses(
        (status = 201, description = "Session scheduled", body = SessionDto),
        (status = 401, description = "No platform login stored", body = ErrorDto),
        (status = 404, description = "No student with this email", body = ErrorDto),
        (status = 409, description = "A session exist at the same date", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn scheduling_webhook(
    State(state): State<AppState>,
    Json(event): Json<SchedulingEventDto>,
) -> Result<impl IntoResponse, Error> {
    let invitee = &event.payload.invitee;
    let student = StudentService::new(&state.db)
        .get_by_email(&invitee.email)
        .await?
        .ok_or_else(|| StudentError::EmailNotFound(invitee.email.clone()))?;

    tracing::debug!(
        "Received {} event for {} at {}",
        event.event,
        invitee.name,
        event.payload.event.start_time
    );

    let credentials = stored_platform_credentials(&state).await?;
    let session = SessionService::new(&state.db, &state.platform)
        .schedule(&credentials, student.id, event.payload.event.start_time)
        .await?;

    Ok((StatusCode::CREATED, Json(session)))
}
