use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use foodgram_shared::Viewer;
use serde::Deserialize;

use crate::{
    auth::{AuthUser, MaybeAuth},
    error::{AppError, Result},
    routes::{AppState, JsonBody, Page, PageParams, RegisteredUserDto, UserDto},
};

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
}

impl From<RegisterRequest> for foodgram_user::RegisterInput {
    fn from(request: RegisterRequest) -> Self {
        Self {
            email: request.email,
            username: request.username,
            first_name: request.first_name,
            last_name: request.last_name,
            password: request.password,
        }
    }
}

#[derive(Deserialize)]
pub struct SetPasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

pub async fn list(
    State(app): State<AppState>,
    MaybeAuth(viewer): MaybeAuth,
    Query(params): Query<PageParams>,
    uri: Uri,
) -> Result<Json<Page<UserDto>>> {
    let users = app.user_query.list_users(&viewer).await?;
    let page = Page::paginate(users, &params, app.config.pagination.default_limit, &uri)?;

    Ok(Json(page.map(UserDto::from)))
}

pub async fn register(
    State(app): State<AppState>,
    JsonBody(input): JsonBody<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let id = app.user_command.register(input.into()).await?;

    let user = app
        .user_query
        .find_user(id, &Viewer::Anonymous)
        .await?
        .ok_or_else(|| AppError::not_found("user"))?;

    Ok((StatusCode::CREATED, Json(RegisteredUserDto::from(user))))
}

pub async fn me(State(app): State<AppState>, user: AuthUser) -> Result<Json<UserDto>> {
    let viewer = user.viewer();
    let view = app
        .user_query
        .find_user(user.0.id, &viewer)
        .await?
        .ok_or_else(|| AppError::not_found("user"))?;

    Ok(Json(view.into()))
}

pub async fn detail(
    State(app): State<AppState>,
    MaybeAuth(viewer): MaybeAuth,
    Path(id): Path<String>,
) -> Result<Json<UserDto>> {
    let view = app
        .user_query
        .find_user(id, &viewer)
        .await?
        .ok_or_else(|| AppError::not_found("user"))?;

    Ok(Json(view.into()))
}

pub async fn set_password(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(input): JsonBody<SetPasswordRequest>,
) -> Result<StatusCode> {
    app.user_command
        .set_password(
            user.id,
            foodgram_user::SetPasswordInput {
                current_password: input.current_password,
                new_password: input.new_password,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
