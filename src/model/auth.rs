use serde::{Deserialize, Serialize};

/// Platform credentials posted to the login route as a form
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Bearer token issued by the platform after a successful login
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenDto {
    pub access_token: String,
    pub token_type: String,
}
