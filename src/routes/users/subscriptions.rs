use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use foodgram_user::UserView;
use serde::Deserialize;

use crate::{
    auth::AuthUser,
    error::{AppError, Result},
    routes::{AppState, Page, PageParams, SubscriptionDto},
};

#[derive(Debug, Default, Deserialize)]
pub struct RecipesLimit {
    pub recipes_limit: Option<u64>,
}

async fn to_dto(app: &AppState, author: UserView, limit: Option<u64>) -> Result<SubscriptionDto> {
    let recipes = app
        .recipe_query
        .short_recipes_by_author(&author.id, limit)
        .await?;
    let count = app.recipe_query.count_by_author(&author.id).await?;

    Ok((author, recipes, count).into())
}

/// GET /api/users/subscriptions/
pub async fn list(
    State(app): State<AppState>,
    user: AuthUser,
    Query(params): Query<PageParams>,
    Query(limit): Query<RecipesLimit>,
    uri: Uri,
) -> Result<Json<Page<SubscriptionDto>>> {
    let authors = app.user_query.list_subscriptions(&user.viewer()).await?;
    let page = Page::paginate(authors, &params, app.config.pagination.default_limit, &uri)?;

    let mut results = Vec::with_capacity(page.results.len());
    for author in page.results.iter().cloned() {
        results.push(to_dto(&app, author, limit.recipes_limit).await?);
    }

    Ok(Json(page.with_results(results)))
}

/// POST /api/users/{id}/subscribe/
pub async fn subscribe(
    State(app): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Query(limit): Query<RecipesLimit>,
) -> Result<impl IntoResponse> {
    app.user_command
        .subscription
        .subscribe(&user.0.id, &id)
        .await?;

    let author = app
        .user_query
        .find_user(id, &user.viewer())
        .await?
        .ok_or_else(|| AppError::not_found("author"))?;

    Ok((
        StatusCode::CREATED,
        Json(to_dto(&app, author, limit.recipes_limit).await?),
    ))
}

/// DELETE /api/users/{id}/subscribe/
pub async fn unsubscribe(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    app.user_command
        .subscription
        .unsubscribe(user.id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
