use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mentor_billing::{
    model::{
        session::{SessionDateParams, SessionDto},
        student::{SessionFilterParams, StudentDto, StudentSummaryDto},
    },
    server::{
        controller::{
            student::{
                create_student, delete_student, get_student, get_student_sessions, list_students,
                schedule_student_session,
            },
            util::auth::BearerToken,
        },
        model::app::AppState,
    },
};

use super::*;

/// Expect 404 Not Found when no student is stored
#[tokio::test]
async fn list_returns_not_found_when_empty() -> Result<(), TestError> {
    let test = TestBuilder::new().with_billing_tables().build().await?;

    let result = list_students(State(test.to_app_state())).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 200 OK with every stored student
#[tokio::test]
async fn list_returns_students() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_student(1, SELF_FUNDED)
        .with_student(2, THIRD_PARTY_FUNDED)
        .build()
        .await?;

    let result = list_students(State(test.to_app_state())).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let students: Vec<StudentSummaryDto> = body_json(resp).await;
    assert_eq!(students.len(), 2);

    Ok(())
}

/// Expect 201 Created, then 409 Conflict for the same id
#[tokio::test]
async fn create_rejects_existing_student() -> Result<(), TestError> {
    let test = TestBuilder::new().with_billing_tables().build().await?;
    let state: AppState = test.to_app_state();
    let student = StudentDto::from(factory::mock_student(3, SELF_FUNDED));

    let created = create_student(State(state.clone()), Json(student.clone())).await;
    assert_eq!(created.unwrap().into_response().status(), StatusCode::CREATED);

    let duplicate = create_student(State(state), Json(student)).await;
    assert!(duplicate.is_err());
    assert_eq!(
        duplicate.err().unwrap().into_response().status(),
        StatusCode::CONFLICT
    );

    Ok(())
}

/// Expect 200 OK for a stored student and 404 Not Found otherwise
#[tokio::test]
async fn get_finds_student_by_id() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_student(1, SELF_FUNDED)
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let found = get_student(State(state.clone()), Path(1)).await;
    let resp = found.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let student: StudentSummaryDto = body_json(resp).await;
    assert_eq!(student.email, factory::student_email(1));
    assert_eq!(student.status, SELF_FUNDED);

    let missing = get_student(State(state), Path(2)).await;
    assert_eq!(
        missing.err().unwrap().into_response().status(),
        StatusCode::NOT_FOUND
    );

    Ok(())
}

/// Expect 404 Not Found when deleting a student twice
#[tokio::test]
async fn delete_reports_missing_student() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_student(1, SELF_FUNDED)
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let first = delete_student(State(state.clone()), Path(1)).await;
    assert_eq!(first.unwrap().into_response().status(), StatusCode::OK);

    let second = delete_student(State(state), Path(1)).await;
    assert_eq!(
        second.err().unwrap().into_response().status(),
        StatusCode::NOT_FOUND
    );

    Ok(())
}

/// Expect status filters to apply and 404 Not Found when nothing matches
#[tokio::test]
async fn sessions_apply_status_filters() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_student(1, SELF_FUNDED)
        .with_session(factory::mock_session(1, 1, factory::date(2021, 5, 3, 10), "completed"))
        .with_session(factory::mock_session(2, 1, factory::date(2021, 5, 10, 10), "canceled"))
        .with_session(factory::mock_session(3, 1, factory::date(2021, 5, 17, 10), "pending"))
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = get_student_sessions(
        State(state.clone()),
        Path(1),
        Query(SessionFilterParams {
            include_status: String::new(),
            exclude_status: "canceled,pending".to_string(),
        }),
    )
    .await;
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let sessions: Vec<SessionDto> = body_json(resp).await;
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, 1);

    let none = get_student_sessions(
        State(state),
        Path(1),
        Query(SessionFilterParams {
            include_status: "marked student as absent".to_string(),
            exclude_status: String::new(),
        }),
    )
    .await;
    assert_eq!(none.unwrap().into_response().status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 201 Created with the session the platform lists after booking
#[tokio::test]
async fn schedule_books_session_for_student() -> Result<(), TestError> {
    let date = factory::date(2022, 3, 4, 10);
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_platform_cookie()
        .with_me_endpoint(1)
        .with_schedule_endpoint(201, 1)
        .with_find_session_endpoint(vec![factory::platform_session(55, 7, date, "pending")], 1)
        .build()
        .await?;

    let result = schedule_student_session(
        State(test.to_app_state()),
        BearerToken(TEST_ACCESS_TOKEN.to_string()),
        Path(7),
        Query(SessionDateParams { session_date: date }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let session: SessionDto = body_json(resp).await;
    assert_eq!(session.id, 55);
    assert_eq!(session.recipient, 7);
    test.assert_mocks();

    Ok(())
}

/// Expect 401 Unauthorized without calling the booking endpoint for a rejected token
#[tokio::test]
async fn schedule_requires_valid_token() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_platform_cookie()
        .with_me_endpoint(0)
        .with_schedule_endpoint(201, 0)
        .build()
        .await?;

    let result = schedule_student_session(
        State(test.to_app_state()),
        BearerToken("expired-token".to_string()),
        Path(7),
        Query(SessionDateParams {
            session_date: factory::date(2022, 3, 4, 10),
        }),
    )
    .await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    test.assert_mocks();

    Ok(())
}
