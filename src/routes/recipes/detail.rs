use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use foodgram_recipe::IngredientAmount;
use serde::Deserialize;

use crate::{
    auth::{AuthUser, MaybeAuth},
    error::Result,
    routes::{AppState, JsonBody, RecipeDto},
};

/// PATCH body. Scalars are optional, both association sets are required.
#[derive(Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub ingredients: Vec<IngredientAmount>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i64>,
}

impl From<UpdateRequest> for foodgram_recipe::UpdateInput {
    fn from(request: UpdateRequest) -> Self {
        Self {
            name: request.name,
            image: request.image,
            text: request.text,
            cooking_time: request.cooking_time,
            ingredients: request.ingredients,
            tags: request.tags,
        }
    }
}

pub async fn page(
    State(app): State<AppState>,
    MaybeAuth(viewer): MaybeAuth,
    Path(id): Path<String>,
) -> Result<Json<RecipeDto>> {
    Ok(Json(super::find_dto(&app, &id, &viewer).await?))
}

pub async fn update(
    State(app): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateRequest>,
) -> Result<Json<RecipeDto>> {
    app.recipe_command
        .update(&id, input.into(), &user.0.id)
        .await?;

    Ok(Json(super::find_dto(&app, &id, &user.viewer()).await?))
}

pub async fn delete(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    app.recipe_command.delete(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
