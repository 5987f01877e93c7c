use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    auth::AuthUser,
    error::{AppError, Result},
    routes::{AppState, ShortRecipeDto},
};

/// POST /api/recipes/{id}/favorite/
pub async fn add(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    app.recipe_command.favorite.save(&id, user.id).await?;

    let recipe = app
        .recipe_query
        .find_short(&id)
        .await?
        .ok_or_else(|| AppError::not_found("recipe"))?;

    Ok((StatusCode::CREATED, Json(ShortRecipeDto::from(recipe))))
}

/// DELETE /api/recipes/{id}/favorite/
pub async fn remove(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    app.recipe_command.favorite.unsave(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
