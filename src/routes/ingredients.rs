use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    routes::{AppState, IngredientDto},
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

/// GET /api/ingredients/?name=, case-insensitive name prefix, not paginated
pub async fn list(
    State(app): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<IngredientDto>>> {
    let ingredients = app
        .recipe_query
        .search_ingredients(params.name.as_deref())
        .await?;

    Ok(Json(ingredients.into_iter().map(IngredientDto::from).collect()))
}

pub async fn detail(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IngredientDto>> {
    let ingredient = app
        .recipe_query
        .find_ingredient(&id)
        .await?
        .ok_or_else(|| AppError::not_found("ingredient"))?;

    Ok(Json(ingredient.into()))
}
