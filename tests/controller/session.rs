use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mentor_billing::{
    model::{
        api::MessageDto,
        session::{ScheduleSessionDto, SessionDateParams, SessionDto},
    },
    server::{
        controller::{
            session::{
                cancel_session, cancel_sessions_from, get_session, schedule_session,
                update_sessions,
            },
            util::auth::BearerToken,
        },
        data::{session::SessionRepository, student::StudentRepository},
        model::app::AppState,
    },
};

use super::*;

fn token() -> BearerToken {
    BearerToken(TEST_ACCESS_TOKEN.to_string())
}

/// Expect 200 OK for a stored session and 404 Not Found otherwise
#[tokio::test]
async fn get_finds_session_by_id() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_session(factory::mock_session(1, 7, factory::date(2021, 5, 3, 10), "completed"))
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let found = get_session(State(state.clone()), Path(1)).await;
    let resp = found.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let session: SessionDto = body_json(resp).await;
    assert_eq!(session.recipient, 7);

    let missing = get_session(State(state), Path(2)).await;
    assert_eq!(
        missing.err().unwrap().into_response().status(),
        StatusCode::NOT_FOUND
    );

    Ok(())
}

/// Expect 409 Conflict when a stored session starts within the hour
#[tokio::test]
async fn schedule_rejects_taken_slot() -> Result<(), TestError> {
    let date = factory::date(2022, 3, 4, 10);
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_platform_cookie()
        .with_session(factory::mock_session(
            1,
            7,
            date - chrono::Duration::minutes(45),
            "pending",
        ))
        .with_me_endpoint(1)
        .with_schedule_endpoint(201, 0)
        .build()
        .await?;

    let result = schedule_session(
        State(test.to_app_state()),
        token(),
        Json(ScheduleSessionDto {
            student_id: 8,
            session_date: date,
        }),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    test.assert_mocks();

    Ok(())
}

/// Expect the platform status when it refuses a booking
#[tokio::test]
async fn schedule_forwards_platform_refusal() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_platform_cookie()
        .with_me_endpoint(1)
        .with_schedule_endpoint(422, 1)
        .with_find_session_endpoint(Vec::new(), 0)
        .build()
        .await?;

    let result = schedule_session(
        State(test.to_app_state()),
        token(),
        Json(ScheduleSessionDto {
            student_id: 8,
            session_date: factory::date(2022, 3, 4, 10),
        }),
    )
    .await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    test.assert_mocks();

    Ok(())
}

/// Expect the stored session to be removed and a confirmation message returned
#[tokio::test]
async fn cancel_removes_stored_session() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_platform_cookie()
        .with_session(factory::mock_session(4, 7, factory::date(2022, 3, 4, 10), "pending"))
        .with_me_endpoint(1)
        .with_cancel_endpoint(4, 200, 1)
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = cancel_session(State(state.clone()), token(), Path(4)).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let message: MessageDto = body_json(resp).await;
    assert_eq!(message.message, "Session 4 deleted");
    assert!(SessionRepository::new(&state.db).find_by_id(4).await?.is_none());
    test.assert_mocks();

    Ok(())
}

/// Expect 404 Not Found when no stored session starts on or after the date
#[tokio::test]
async fn cancel_from_reports_no_sessions() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_platform_cookie()
        .with_session(factory::mock_session(1, 7, factory::date(2022, 3, 1, 10), "pending"))
        .with_me_endpoint(1)
        .build()
        .await?;

    let result = cancel_sessions_from(
        State(test.to_app_state()),
        token(),
        Query(SessionDateParams {
            session_date: factory::date(2022, 3, 2, 0),
        }),
    )
    .await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::NOT_FOUND
    );

    Ok(())
}

/// Expect 200 OK with every session the platform cancelled
#[tokio::test]
async fn cancel_from_returns_cancelled_sessions() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_platform_cookie()
        .with_session(factory::mock_session(1, 7, factory::date(2022, 3, 3, 10), "pending"))
        .with_session(factory::mock_session(2, 8, factory::date(2022, 3, 4, 10), "pending"))
        .with_me_endpoint(1)
        .with_cancel_endpoint(1, 200, 1)
        .with_cancel_endpoint(2, 200, 1)
        .build()
        .await?;

    let result = cancel_sessions_from(
        State(test.to_app_state()),
        token(),
        Query(SessionDateParams {
            session_date: factory::date(2022, 3, 2, 0),
        }),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let cancelled: Vec<SessionDto> = body_json(resp).await;
    assert_eq!(cancelled.len(), 2);
    test.assert_mocks();

    Ok(())
}

/// Expect 201 Created with imported sessions and their students stored
#[tokio::test]
async fn update_imports_sessions() -> Result<(), TestError> {
    let page = vec![
        factory::platform_session(10, 7, factory::date(2022, 3, 1, 9), "completed"),
        factory::platform_session(11, 7, factory::date(2022, 3, 8, 9), "pending"),
    ];
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_platform_cookie()
        .with_me_endpoint(1)
        .with_sessions_page_endpoint("items=0-19", page, 2, 1)
        .with_student_endpoints(7, Some(THIRD_PARTY_FUNDED), 1)
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = update_sessions(State(state.clone()), token()).await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let imported: Vec<SessionDto> = body_json(resp).await;
    assert_eq!(imported.len(), 2);
    let student = StudentRepository::new(&state.db).find_by_id(7).await?;
    assert_eq!(student.map(|s| s.status).as_deref(), Some(THIRD_PARTY_FUNDED));
    test.assert_mocks();

    Ok(())
}

/// Expect 401 Unauthorized when no platform login has been stored
#[tokio::test]
async fn update_requires_stored_login() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_me_endpoint(1)
        .with_empty_sessions_endpoint(0)
        .build()
        .await?;

    let result = update_sessions(State(test.to_app_state()), token()).await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    test.assert_mocks();

    Ok(())
}

/// Expect 404 Not Found when the platform lists no session
#[tokio::test]
async fn update_fails_on_empty_listing() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_platform_cookie()
        .with_me_endpoint(1)
        .with_empty_sessions_endpoint(1)
        .build()
        .await?;

    let result = update_sessions(State(test.to_app_state()), token()).await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::NOT_FOUND
    );
    test.assert_mocks();

    Ok(())
}
