mod favorite;
mod ingredient;
mod recipe;
mod recipe_ingredient;
mod recipe_tag;
mod shopping_cart;
mod subscription;
mod tag;
mod user;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "foodgram",
    "m0_1",
    vec_box![],
    vec_box![
        user::CreateTable,
        ingredient::CreateTable,
        tag::CreateTable,
        recipe::CreateTable,
        recipe_ingredient::CreateTable,
        recipe_tag::CreateTable,
        favorite::CreateTable,
        shopping_cart::CreateTable,
        subscription::CreateTable,
    ]
);
