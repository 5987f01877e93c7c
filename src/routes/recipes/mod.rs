use std::collections::HashMap;

use foodgram_recipe::RecipeView;
use foodgram_shared::Viewer;
use foodgram_user::UserView;

use crate::{
    error::{AppError, Result},
    routes::{AppState, RecipeDto},
};

pub mod detail;
pub mod favorite;
pub mod index;
pub mod shopping_cart;

/// Attach each recipe's author, looked up once per distinct author.
async fn to_dtos(app: &AppState, recipes: Vec<RecipeView>, viewer: &Viewer) -> Result<Vec<RecipeDto>> {
    let mut authors: HashMap<String, UserView> = HashMap::new();
    let mut dtos = Vec::with_capacity(recipes.len());

    for recipe in recipes {
        let author = match authors.get(&recipe.author_id) {
            Some(author) => author.clone(),
            None => {
                let author = app
                    .user_query
                    .find_user(&recipe.author_id, viewer)
                    .await?
                    .ok_or_else(|| AppError::not_found("author"))?;
                authors.insert(recipe.author_id.to_owned(), author.clone());
                author
            }
        };

        dtos.push(RecipeDto::from((recipe, author)));
    }

    Ok(dtos)
}

async fn to_dto(app: &AppState, recipe: RecipeView, viewer: &Viewer) -> Result<RecipeDto> {
    to_dtos(app, vec![recipe], viewer)
        .await?
        .pop()
        .ok_or_else(|| AppError::not_found("recipe"))
}

async fn find_dto(app: &AppState, id: &str, viewer: &Viewer) -> Result<RecipeDto> {
    let recipe = app
        .recipe_query
        .find_recipe(id, viewer)
        .await?
        .ok_or_else(|| AppError::not_found("recipe"))?;

    to_dto(app, recipe, viewer).await
}
