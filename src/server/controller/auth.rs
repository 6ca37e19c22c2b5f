use axum::{extract::State, http::StatusCode, response::IntoResponse, Form, Json};

use crate::{
    model::{
        api::ErrorDto,
        auth::{LoginForm, TokenDto},
    },
    server::{error::Error, model::app::AppState, service::auth::AuthService},
};

pub static AUTH_TAG: &str = "auth";

/// Log into the learning platform
///
/// Forwards the mentor's credentials to the platform, stores the website session cookie it
/// sets and returns the platform's bearer token for use with authenticated routes.
///
/// # Responses
/// - 200 (OK): Login accepted, returns the bearer token
/// - Upstream status: The platform refused the login
/// - 500 (Internal Server Error): The session cookie could not be stored
#[utoipa::path(
    post,
    path = "/token",
    tag = AUTH_TAG,
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login accepted", body = TokenDto),
        (status = 400, description = "Login refused by the platform", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, Error> {
    let token = AuthService::new(&state.db, &state.platform)
        .login(&form.username, &form.password)
        .await?;

    Ok((StatusCode::OK, Json(token)))
}
