use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use foodgram_recipe::{IngredientAmount, RecipeFilter};
use serde::Deserialize;

use crate::{
    auth::{AuthUser, MaybeAuth},
    error::Result,
    routes::{AppState, JsonBody, Page, PageParams, RecipeDto},
};

/// Filters of GET /api/recipes/. `tags` repeats, one slug each.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

fn flag(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true") | Some("True"))
}

impl From<ListParams> for RecipeFilter {
    fn from(params: ListParams) -> Self {
        Self {
            is_favorited: flag(params.is_favorited.as_deref()),
            is_in_shopping_cart: flag(params.is_in_shopping_cart.as_deref()),
            author: params.author.filter(|author| !author.is_empty()),
            tags: params.tags,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub ingredients: Vec<IngredientAmount>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub cooking_time: i64,
}

impl From<CreateRequest> for foodgram_recipe::CreateInput {
    fn from(request: CreateRequest) -> Self {
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

pub async fn list(
    State(app): State<AppState>,
    MaybeAuth(viewer): MaybeAuth,
    Query(params): Query<PageParams>,
    axum_extra::extract::Query(filter): axum_extra::extract::Query<ListParams>,
    uri: Uri,
) -> Result<Json<Page<RecipeDto>>> {
    let filter = RecipeFilter::from(filter);
    let default_limit = app.config.pagination.default_limit;

    let count = app.recipe_query.count(&filter, &viewer).await?;
    let recipes = app
        .recipe_query
        .filter(
            &filter,
            &viewer,
            params.offset(default_limit),
            params.limit(default_limit),
        )
        .await?;
    let results = super::to_dtos(&app, recipes, &viewer).await?;

    Ok(Json(Page::new(count, results, &params, default_limit, &uri)?))
}

pub async fn create(
    State(app): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<CreateRequest>,
) -> Result<impl IntoResponse> {
    let id = app.recipe_command.create(input.into(), &user.0.id).await?;
    let recipe = super::find_dto(&app, &id, &user.viewer()).await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}
