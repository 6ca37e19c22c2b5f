use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        session::{SessionDateParams, SessionDto},
        student::{SessionFilterParams, StudentDto, StudentSummaryDto},
    },
    server::{
        controller::util::auth::{platform_credentials, BearerToken},
        error::{error_response, student::StudentError, Error},
        model::app::AppState,
        service::{session::SessionService, student::StudentService},
    },
};

pub static STUDENT_TAG: &str = "student";

/// List stored students
#[utoipa::path(
    get,
    path = "/students",
    tag = STUDENT_TAG,
    responses(
        (status = 200, description = "Stored students", body = Vec<StudentSummaryDto>),
        (status = 404, description = "No student stored", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_students(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let students = StudentService::new(&state.db).list().await?;

    if students.is_empty() {
        return Ok(error_response(StatusCode::NOT_FOUND, "No students"));
    }

    Ok((StatusCode::OK, Json(students)).into_response())
}

/// Store a student profile
#[utoipa::path(
    post,
    path = "/students",
    tag = STUDENT_TAG,
    request_body = StudentDto,
    responses(
        (status = 201, description = "Student stored", body = StudentDto),
        (status = 409, description = "Student already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_student(
    State(state): State<AppState>,
    Json(student): Json<StudentDto>,
) -> Result<impl IntoResponse, Error> {
    let student = StudentService::new(&state.db).create(student).await?;

    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = STUDENT_TAG,
    params(("id" = i64, Path, description = "Platform id of the student")),
    responses(
        (status = 200, description = "Student found", body = StudentSummaryDto),
        (status = 404, description = "Student not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    let student = StudentService::new(&state.db)
        .get(id)
        .await?
        .ok_or(StudentError::NotFound(id))?;

    Ok((StatusCode::OK, Json(student)))
}

#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = STUDENT_TAG,
    params(("id" = i64, Path, description = "Platform id of the student")),
    responses(
        (status = 200, description = "Student deleted", body = MessageDto),
        (status = 404, description = "Student not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    if !StudentService::new(&state.db).delete(id).await? {
        return Err(StudentError::NotFound(id).into());
    }

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: format!("Student {} deleted", id),
        }),
    ))
}

/// Sessions of a student
///
/// Filters by lifecycle status: `include_status` keeps only the listed statuses and
/// `exclude_status` drops the listed ones. Both are comma separated.
#[utoipa::path(
    get,
    path = "/students/{id}/sessions",
    tag = STUDENT_TAG,
    params(("id" = i64, Path, description = "Platform id of the student"), SessionFilterParams),
    responses(
        (status = 200, description = "Sessions of the student, latest first", body = Vec<SessionDto>),
        (status = 404, description = "No session matches", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_student_sessions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(filter): Query<SessionFilterParams>,
) -> Result<impl IntoResponse, Error> {
    let sessions = StudentService::new(&state.db)
        .sessions(id, &filter.include_status, &filter.exclude_status)
        .await?;

    if sessions.is_empty() {
        return Ok(error_response(StatusCode::NOT_FOUND, "Sessions not found"));
    }

    Ok((StatusCode::OK, Json(sessions)).into_response())
}

/// Schedule a session with a student
///
/// # Responses
/// - 201 (Created): Session booked on the platform and stored
/// - 401 (Unauthorized): Missing or rejected bearer token
/// - 409 (Conflict): A stored session starts within an hour of the date
/// - Upstream status: The platform refused the booking
#[utoipa::path(
    post,
    path = "/students/{id}/schedule",
    tag = STUDENT_TAG,
    params(("id" = i64, Path, description = "Platform id of the student"), SessionDateParams),
    responses(
        (status = 201, description = "Session scheduled", body = SessionDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 409, description = "A session exist at the same date", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn schedule_student_session(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i64>,
    Query(params): Query<SessionDateParams>,
) -> Result<impl IntoResponse, Error> {
    let credentials = platform_credentials(&state, &token).await?;

    let session = SessionService::new(&state.db, &state.platform)
        .schedule(&credentials, id, params.session_date)
        .await?;

    Ok((StatusCode::CREATED, Json(session)))
}
