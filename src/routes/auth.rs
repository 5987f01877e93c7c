use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::{CookieJar, cookie::Cookie};
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::{AUTH_COOKIE_NAME, AuthUser, build_cookie},
    error::Result,
    routes::{AppState, JsonBody},
};

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/token/login/
pub async fn login(
    State(app): State<AppState>,
    jar: CookieJar,
    JsonBody(input): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse> {
    let user = app
        .user_command
        .login(foodgram_user::LoginInput {
            email: input.email,
            password: input.password,
        })
        .await?;

    let token = foodgram_user::generate_jwt(
        user.id,
        user.token_version,
        &app.config.jwt.secret,
        app.config.jwt.expiration_days,
    )?;

    Ok((
        jar.add(build_cookie(token.to_owned())),
        Json(json!({ "auth_token": token })),
    ))
}

/// POST /api/auth/token/logout/
///
/// Revokes every token of the user and clears the cookie.
pub async fn logout(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    jar: CookieJar,
) -> Result<impl IntoResponse> {
    app.user_command.logout(&user.id).await?;

    Ok((
        jar.remove(Cookie::build(AUTH_COOKIE_NAME).path("/")),
        StatusCode::NO_CONTENT,
    ))
}
