use axum::{extract::State, http::StatusCode, response::IntoResponse, Form};
use mentor_billing::{
    model::auth::{LoginForm, TokenDto},
    server::{controller::auth::login, model::app::AppState},
};

use super::*;

fn login_form(password: &str) -> Form<LoginForm> {
    Form(LoginForm {
        username: TEST_MENTOR_EMAIL.to_string(),
        password: password.to_string(),
    })
}

/// Expect 200 OK with the platform bearer token
#[tokio::test]
async fn returns_platform_token() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_login_endpoints(200, 1)
        .build()
        .await?;

    let state: AppState = test.to_app_state();
    let result = login(State(state), login_form("password")).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let token: TokenDto = body_json(resp).await;
    assert_eq!(token.access_token, TEST_ACCESS_TOKEN);
    assert_eq!(token.token_type, "bearer");
    test.assert_mocks();

    Ok(())
}

/// Expect the platform's status when it refuses the credentials
#[tokio::test]
async fn forwards_refused_login() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .with_login_endpoints(401, 1)
        .build()
        .await?;

    let state: AppState = test.to_app_state();
    let result = login(State(state), login_form("wrong")).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
