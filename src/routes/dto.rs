//! JSON shapes of the public API and their mapping from read models.

use foodgram_recipe::{IngredientView, RecipeIngredientView, RecipeView, ShortRecipeView, TagView};
use foodgram_user::UserView;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub email: String,
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl From<UserView> for UserDto {
    fn from(view: UserView) -> Self {
        Self {
            email: view.email,
            id: view.id,
            username: view.username,
            first_name: view.first_name,
            last_name: view.last_name,
            is_subscribed: view.is_subscribed,
        }
    }
}

/// Registration response, carries no viewer-relative flag.
#[derive(Debug, Serialize)]
pub struct RegisteredUserDto {
    pub email: String,
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserView> for RegisteredUserDto {
    fn from(view: UserView) -> Self {
        Self {
            email: view.email,
            id: view.id,
            username: view.username,
            first_name: view.first_name,
            last_name: view.last_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TagDto {
    pub id: String,
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl From<TagView> for TagDto {
    fn from(view: TagView) -> Self {
        Self {
            id: view.id,
            name: view.name,
            color: view.color,
            slug: view.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IngredientDto {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
}

impl From<IngredientView> for IngredientDto {
    fn from(view: IngredientView) -> Self {
        Self {
            id: view.id,
            name: view.name,
            measurement_unit: view.measurement_unit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeIngredientDto {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

impl From<RecipeIngredientView> for RecipeIngredientDto {
    fn from(view: RecipeIngredientView) -> Self {
        Self {
            id: view.id,
            name: view.name,
            measurement_unit: view.measurement_unit,
            amount: view.amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeDto {
    pub id: String,
    pub tags: Vec<TagDto>,
    pub author: UserDto,
    pub ingredients: Vec<RecipeIngredientDto>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
}

impl From<(RecipeView, UserView)> for RecipeDto {
    fn from((view, author): (RecipeView, UserView)) -> Self {
        Self {
            id: view.id,
            tags: view.tags.into_iter().map(Into::into).collect(),
            author: author.into(),
            ingredients: view.ingredients.into_iter().map(Into::into).collect(),
            is_favorited: view.is_favorited,
            is_in_shopping_cart: view.is_in_shopping_cart,
            name: view.name,
            image: view.image,
            text: view.text,
            cooking_time: view.cooking_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShortRecipeDto {
    pub id: String,
    pub name: String,
    pub image: String,
    pub cooking_time: i64,
}

impl From<ShortRecipeView> for ShortRecipeDto {
    fn from(view: ShortRecipeView) -> Self {
        Self {
            id: view.id,
            name: view.name,
            image: view.image,
            cooking_time: view.cooking_time,
        }
    }
}

/// A followed author with a preview of their recipes.
#[derive(Debug, Serialize)]
pub struct SubscriptionDto {
    #[serde(flatten)]
    pub author: UserDto,
    pub recipes: Vec<ShortRecipeDto>,
    pub recipes_count: i64,
}

impl From<(UserView, Vec<ShortRecipeView>, i64)> for SubscriptionDto {
    fn from((author, recipes, recipes_count): (UserView, Vec<ShortRecipeView>, i64)) -> Self {
        Self {
            author: author.into(),
            recipes: recipes.into_iter().map(Into::into).collect(),
            recipes_count,
        }
    }
}
