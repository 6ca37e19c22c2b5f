use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        session::{ScheduleSessionDto, SessionDateParams, SessionDto},
    },
    server::{
        controller::util::auth::{platform_credentials, BearerToken},
        error::{session::SessionError, Error},
        model::app::AppState,
        service::session::SessionService,
    },
};

pub static SESSION_TAG: &str = "session";

#[utoipa::path(
    get,
    path = "/session/{id}",
    tag = SESSION_TAG,
    params(("id" = i64, Path, description = "Platform id of the session")),
    responses(
        (status = 200, description = "Session found", body = SessionDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    let session = SessionService::new(&state.db, &state.platform)
        .get(id)
        .await?
        .ok_or(SessionError::NotFound(id))?;

    Ok((StatusCode::OK, Json(session)))
}

/// Schedule a session
///
/// Books the session on the platform, then stores the pending session the platform lists at
/// the requested date.
///
/// # Responses
/// - 201 (Created): Session booked and stored
/// - 401 (Unauthorized): Missing or rejected bearer token
/// - 409 (Conflict): A stored session starts within an hour of the date
/// - Upstream status: The platform refused the booking
#[utoipa::path(
    post,
    path = "/session",
    tag = SESSION_TAG,
    request_body = ScheduleSessionDto,
    responses(
        (status = 201, description = "Session scheduled", body = SessionDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 409, description = "A session exist at the same date", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn schedule_session(
    State(state): State<AppState>,
    token: BearerToken,
    Json(request): Json<ScheduleSessionDto>,
) -> Result<impl IntoResponse, Error> {
    let credentials = platform_credentials(&state, &token).await?;

    let session = SessionService::new(&state.db, &state.platform)
        .schedule(&credentials, request.student_id, request.session_date)
        .await?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// Cancel a session
///
/// The stored copy is removed whether or not the platform accepts the cancellation.
#[utoipa::path(
    delete,
    path = "/session/{id}",
    tag = SESSION_TAG,
    params(("id" = i64, Path, description = "Platform id of the session")),
    responses(
        (status = 200, description = "Session cancelled", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn cancel_session(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    let credentials = platform_credentials(&state, &token).await?;

    let cancelled = SessionService::new(&state.db, &state.platform)
        .cancel(&credentials, id)
        .await?;

    if !cancelled {
        tracing::warn!("Platform did not confirm cancellation of session {}", id);
    }

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: format!("Session {} deleted", id),
        }),
    ))
}

/// Cancel every stored session starting on or after a date
#[utoipa::path(
    delete,
    path = "/session",
    tag = SESSION_TAG,
    params(SessionDateParams),
    responses(
        (status = 200, description = "Sessions cancelled by the platform", body = Vec<SessionDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "No session found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn cancel_sessions_from(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<SessionDateParams>,
) -> Result<impl IntoResponse, Error> {
    let credentials = platform_credentials(&state, &token).await?;

    let cancelled = SessionService::new(&state.db, &state.platform)
        .cancel_from(&credentials, params.session_date)
        .await?;

    Ok((StatusCode::OK, Json(cancelled)))
}

/// Import sessions from the platform
///
/// Stores every session not seen before along with the students they mention.
#[utoipa::path(
    put,
    path = "/session/update_sessions",
    tag = SESSION_TAG,
    responses(
        (status = 201, description = "Newly imported sessions", body = Vec<SessionDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "The platform listed no session", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_sessions(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<impl IntoResponse, Error> {
    let credentials = platform_credentials(&state, &token).await?;

    let imported = SessionService::new(&state.db, &state.platform)
        .sync(&credentials)
        .await?;

    Ok((StatusCode::CREATED, Json(imported)))
}
