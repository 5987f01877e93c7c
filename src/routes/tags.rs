use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::{AppError, Result},
    routes::{AppState, TagDto},
};

/// GET /api/tags/, not paginated
pub async fn list(State(app): State<AppState>) -> Result<Json<Vec<TagDto>>> {
    let tags = app.recipe_query.list_tags().await?;

    Ok(Json(tags.into_iter().map(TagDto::from).collect()))
}

pub async fn detail(State(app): State<AppState>, Path(id): Path<String>) -> Result<Json<TagDto>> {
    let tag = app
        .recipe_query
        .find_tag(&id)
        .await?
        .ok_or_else(|| AppError::not_found("tag"))?;

    Ok(Json(tag.into()))
}
