//! Replacement of a recipe's ingredient and tag links.
//!
//! Both sets are validated as a whole before anything is written, then
//! swapped with a delete followed by a bulk insert on the caller's
//! transaction. Dropping the transaction without commit leaves the previous
//! sets in place.

use std::collections::HashSet;

use foodgram_db::{
    MAX_AMOUNT,
    table::{Ingredient, RecipeIngredient, RecipeTag, Tag},
};
use sea_query::{Expr, ExprTrait, Func, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::SqliteConnection;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct IngredientAmount {
    pub id: String,
    pub amount: i64,
}

impl IngredientAmount {
    pub fn new(id: impl Into<String>, amount: i64) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }
}

pub(crate) async fn validate_ingredients(
    conn: &mut SqliteConnection,
    items: &[IngredientAmount],
) -> foodgram_shared::Result<()> {
    if items.is_empty() {
        foodgram_shared::invalid!(
            "ingredients",
            "required",
            "At least one ingredient is required."
        );
    }

    let mut ids = HashSet::new();
    for item in items {
        if item.amount < 1 {
            foodgram_shared::invalid!(
                "ingredients",
                "min_amount",
                "Ingredient amount must be greater than 0."
            );
        }

        if item.amount > MAX_AMOUNT {
            foodgram_shared::invalid!(
                "ingredients",
                "max_amount",
                "Ingredient amount must be at most {}.",
                MAX_AMOUNT
            );
        }

        if !ids.insert(item.id.as_str()) {
            foodgram_shared::invalid!("ingredients", "unique", "Ingredients must be unique.");
        }
    }

    let statement = Query::select()
        .expr(Func::count(Expr::col(Ingredient::Id)))
        .from(Ingredient::Table)
        .and_where(Expr::col(Ingredient::Id).is_in(ids.iter().map(|id| id.to_string())))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let found = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_one(&mut *conn)
        .await?;

    if found as usize != ids.len() {
        foodgram_shared::invalid!("ingredients", "does_not_exist", "Ingredient does not exist.");
    }

    Ok(())
}

pub(crate) async fn validate_tags(
    conn: &mut SqliteConnection,
    tags: &[String],
) -> foodgram_shared::Result<()> {
    if tags.is_empty() {
        foodgram_shared::invalid!("tags", "required", "At least one tag is required.");
    }

    let ids = tags.iter().map(String::as_str).collect::<HashSet<_>>();
    if ids.len() != tags.len() {
        foodgram_shared::invalid!("tags", "unique", "Tags must be unique.");
    }

    let statement = Query::select()
        .expr(Func::count(Expr::col(Tag::Id)))
        .from(Tag::Table)
        .and_where(Expr::col(Tag::Id).is_in(tags.iter().cloned()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let found = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
        .fetch_one(&mut *conn)
        .await?;

    if found as usize != tags.len() {
        foodgram_shared::invalid!("tags", "does_not_exist", "Tag does not exist.");
    }

    Ok(())
}

/// Swap the ingredient links of `recipe_id`, keeping the input order.
pub(crate) async fn replace_ingredients(
    conn: &mut SqliteConnection,
    recipe_id: &str,
    items: &[IngredientAmount],
) -> foodgram_shared::Result<()> {
    let statement = Query::delete()
        .from_table(RecipeIngredient::Table)
        .and_where(Expr::col(RecipeIngredient::RecipeId).eq(recipe_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let mut statement = Query::insert()
        .into_table(RecipeIngredient::Table)
        .columns([
            RecipeIngredient::RecipeId,
            RecipeIngredient::IngredientId,
            RecipeIngredient::Amount,
            RecipeIngredient::Position,
        ])
        .to_owned();

    for (position, item) in items.iter().enumerate() {
        statement.values_panic([
            recipe_id.into(),
            item.id.to_owned().into(),
            item.amount.into(),
            (position as i64).into(),
        ]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

pub(crate) async fn replace_tags(
    conn: &mut SqliteConnection,
    recipe_id: &str,
    tags: &[String],
) -> foodgram_shared::Result<()> {
    let statement = Query::delete()
        .from_table(RecipeTag::Table)
        .and_where(Expr::col(RecipeTag::RecipeId).eq(recipe_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let mut statement = Query::insert()
        .into_table(RecipeTag::Table)
        .columns([RecipeTag::RecipeId, RecipeTag::TagId])
        .to_owned();

    for tag_id in tags {
        statement.values_panic([recipe_id.into(), tag_id.to_owned().into()]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

