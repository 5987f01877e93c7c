use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    auth::AuthUser,
    error::{AppError, Result},
    routes::{AppState, ShortRecipeDto},
};

/// POST /api/recipes/{id}/shopping_cart/
pub async fn add(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    app.shopping_command.add(&id, user.id).await?;

    let recipe = app
        .recipe_query
        .find_short(&id)
        .await?
        .ok_or_else(|| AppError::not_found("recipe"))?;

    Ok((StatusCode::CREATED, Json(ShortRecipeDto::from(recipe))))
}

/// DELETE /api/recipes/{id}/shopping_cart/
pub async fn remove(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    app.shopping_command.remove(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/recipes/download_shopping_cart/
pub async fn download(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse> {
    let body = app.shopping_query.export_shopping_list(&user.id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_list.txt\"",
            ),
        ],
        body,
    ))
}
