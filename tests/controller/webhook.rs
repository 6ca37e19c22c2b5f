use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use mentor_billing::{
    model::{
        session::SessionDto,
        webhook::{InviteeDto, ScheduledEventDto, SchedulingEventDto, SchedulingPayloadDto},
    },
    server::{
        controller::webhook::scheduling_webhook,
        data::session::SessionRepository,
        model::app::AppState,
    },
};

use super::*;

fn scheduling_event(email: &str, start_time: chrono::DateTime<chrono::Utc>) -> SchedulingEventDto {
    SchedulingEventDto {
        event: "invitee.created".to_string(),
        time: "2022-03-01T08:00:00Z".to_string(),
        payload: SchedulingPayloadDto {
            event: ScheduledEventDto { start_time },
            invitee: InviteeDto {
                name: "Student 7".to_string(),
                email: email.to_string(),
            },
        },
    }
}

/// Expect the invitee's student to get a session at the booked time
#[tokio::test]
async fn schedules_session_for_invitee() -> Result<(), TestError> {
    let date = factory::date(2022, 3, 4, 10);
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_platform_cookie()
        .with_student(7, SELF_FUNDED)
        .with_me_endpoint(1)
        .with_schedule_endpoint(201, 1)
        .with_find_session_endpoint(vec![factory::platform_session(90, 7, date, "pending")], 1)
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = scheduling_webhook(
        State(state.clone()),
        Json(scheduling_event(&factory::student_email(7), date)),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let session: SessionDto = body_json(resp).await;
    assert_eq!(session.recipient, 7);
    assert!(SessionRepository::new(&state.db).find_by_id(90).await?.is_some());
    test.assert_mocks();

    Ok(())
}

/// Expect 404 Not Found without booking anything for an unknown email
#[tokio::test]
async fn rejects_unknown_invitee() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_platform_cookie()
        .with_student(7, SELF_FUNDED)
        .with_me_endpoint(0)
        .with_schedule_endpoint(201, 0)
        .build()
        .await?;

    let result = scheduling_webhook(
        State(test.to_app_state()),
        Json(scheduling_event("someone@example.com", factory::date(2022, 3, 4, 10))),
    )
    .await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::NOT_FOUND
    );
    test.assert_mocks();

    Ok(())
}

/// Expect 401 Unauthorized when no platform login has been stored
#[tokio::test]
async fn requires_stored_login() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_student(7, SELF_FUNDED)
        .with_me_endpoint(0)
        .with_schedule_endpoint(201, 0)
        .build()
        .await?;

    let result = scheduling_webhook(
        State(test.to_app_state()),
        Json(scheduling_event(&factory::student_email(7), factory::date(2022, 3, 4, 10))),
    )
    .await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    test.assert_mocks();

    Ok(())
}
