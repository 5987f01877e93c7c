use std::collections::{HashMap, HashSet};

use foodgram_db::table::{Favorite, Ingredient, Recipe, RecipeIngredient, RecipeTag, ShoppingCart, Tag};
use foodgram_shared::Viewer;
use sea_query::{
    Expr, ExprTrait, Func, Order, Query as SeaQuery, SelectStatement, SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

use super::TagView;

#[derive(Debug, Clone, FromRow)]
struct RecipeRow {
    id: String,
    author_id: String,
    name: String,
    image: String,
    text: String,
    cooking_time: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeIngredientView {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

#[derive(FromRow)]
struct RecipeIngredientRow {
    recipe_id: String,
    id: String,
    name: String,
    measurement_unit: String,
    amount: i64,
}

#[derive(FromRow)]
struct RecipeTagRow {
    recipe_id: String,
    id: String,
    name: String,
    color: String,
    slug: String,
}

#[derive(Debug, Clone)]
pub struct RecipeView {
    pub id: String,
    pub author_id: String,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
    pub ingredients: Vec<RecipeIngredientView>,
    pub tags: Vec<TagView>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Compact form used in subscription listings and toggle responses.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ShortRecipeView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub cooking_time: i64,
}

#[derive(Debug, Default, Clone)]
pub struct RecipeFilter {
    pub author: Option<String>,
    /// Tag slugs, any of which matches.
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

fn select_recipes() -> SelectStatement {
    SeaQuery::select()
        .columns([
            (Recipe::Table, Recipe::Id),
            (Recipe::Table, Recipe::AuthorId),
            (Recipe::Table, Recipe::Name),
            (Recipe::Table, Recipe::Image),
            (Recipe::Table, Recipe::Text),
            (Recipe::Table, Recipe::CookingTime),
        ])
        .from(Recipe::Table)
        .to_owned()
}

impl super::Query {
    pub async fn find_recipe(
        &self,
        id: &str,
        viewer: &Viewer,
    ) -> foodgram_shared::Result<Option<RecipeView>> {
        let statement = select_recipes()
            .and_where(Expr::col((Recipe::Table, Recipe::Id)).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let Some(row) = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
        else {
            return Ok(None);
        };

        let mut recipes = hydrate(&self.read_db, vec![row], viewer).await?;

        Ok(recipes.pop())
    }

    /// Total number of recipes matching `input`.
    pub async fn count(&self, input: &RecipeFilter, viewer: &Viewer) -> foodgram_shared::Result<usize> {
        let Some(mut statement) = matching(input, viewer) else {
            return Ok(0);
        };

        statement
            .clear_selects()
            .expr(Func::count(Expr::col((Recipe::Table, Recipe::Id))));

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let count = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        Ok(count as usize)
    }

    /// Recipes matching every given criterion, newest first, skipping
    /// `offset` and returning at most `limit`. Viewer-scoped criteria match
    /// nothing for an anonymous viewer.
    pub async fn filter(
        &self,
        input: &RecipeFilter,
        viewer: &Viewer,
        offset: u64,
        limit: u64,
    ) -> foodgram_shared::Result<Vec<RecipeView>> {
        let Some(mut statement) = matching(input, viewer) else {
            return Ok(vec![]);
        };

        statement
            .order_by((Recipe::Table, Recipe::CreatedAt), Order::Desc)
            .order_by((Recipe::Table, Recipe::Id), Order::Desc)
            .limit(limit)
            .offset(offset);

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        hydrate(&self.read_db, rows, viewer).await
    }

    pub async fn is_favorited(&self, id: &str, viewer: &Viewer) -> foodgram_shared::Result<bool> {
        let Some(user_id) = viewer.user_id() else {
            return Ok(false);
        };

        let ids = fetch_ids(&self.read_db, favorited_ids(user_id, vec![id.to_owned()])).await?;

        Ok(!ids.is_empty())
    }

    pub async fn is_in_cart(&self, id: &str, viewer: &Viewer) -> foodgram_shared::Result<bool> {
        let Some(user_id) = viewer.user_id() else {
            return Ok(false);
        };

        let ids = fetch_ids(&self.read_db, in_cart_ids(user_id, vec![id.to_owned()])).await?;

        Ok(!ids.is_empty())
    }

    pub async fn find_short(&self, id: &str) -> foodgram_shared::Result<Option<ShortRecipeView>> {
        let statement = SeaQuery::select()
            .columns([Recipe::Id, Recipe::Name, Recipe::Image, Recipe::CookingTime])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ShortRecipeView, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    /// Newest recipes of an author, at most `limit` when given.
    pub async fn short_recipes_by_author(
        &self,
        author_id: &str,
        limit: Option<u64>,
    ) -> foodgram_shared::Result<Vec<ShortRecipeView>> {
        let mut statement = SeaQuery::select()
            .columns([Recipe::Id, Recipe::Name, Recipe::Image, Recipe::CookingTime])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::AuthorId).eq(author_id))
            .order_by(Recipe::CreatedAt, Order::Desc)
            .order_by(Recipe::Id, Order::Desc)
            .to_owned();

        if let Some(limit) = limit {
            statement.limit(limit);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ShortRecipeView, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    pub async fn count_by_author(&self, author_id: &str) -> foodgram_shared::Result<i64> {
        let statement = SeaQuery::select()
            .expr(Func::count(Expr::col(Recipe::Id)))
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::AuthorId).eq(author_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_scalar_with::<_, i64, _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?)
    }
}

/// Recipe rows restricted to `input`, `None` when nothing can match.
fn matching(input: &RecipeFilter, viewer: &Viewer) -> Option<SelectStatement> {
    let mut statement = select_recipes();

    if let Some(author) = &input.author {
        statement.and_where(Expr::col((Recipe::Table, Recipe::AuthorId)).eq(author.as_str()));
    }

    if !input.tags.is_empty() {
        let tagged = SeaQuery::select()
            .column((RecipeTag::Table, RecipeTag::RecipeId))
            .from(RecipeTag::Table)
            .inner_join(
                Tag::Table,
                Expr::col((Tag::Table, Tag::Id)).equals((RecipeTag::Table, RecipeTag::TagId)),
            )
            .and_where(Expr::col((Tag::Table, Tag::Slug)).is_in(input.tags.iter().cloned()))
            .to_owned();

        statement.and_where(Expr::col((Recipe::Table, Recipe::Id)).in_subquery(tagged));
    }

    if input.is_favorited || input.is_in_shopping_cart {
        let user_id = viewer.user_id()?;

        if input.is_favorited {
            let favorited = SeaQuery::select()
                .column(Favorite::RecipeId)
                .from(Favorite::Table)
                .and_where(Expr::col(Favorite::UserId).eq(user_id))
                .to_owned();

            statement.and_where(Expr::col((Recipe::Table, Recipe::Id)).in_subquery(favorited));
        }

        if input.is_in_shopping_cart {
            let in_cart = SeaQuery::select()
                .column(ShoppingCart::RecipeId)
                .from(ShoppingCart::Table)
                .and_where(Expr::col(ShoppingCart::UserId).eq(user_id))
                .to_owned();

            statement.and_where(Expr::col((Recipe::Table, Recipe::Id)).in_subquery(in_cart));
        }
    }

    Some(statement)
}

/// Attach ingredients, tags and viewer flags to a page of recipe rows with
/// one query per concern.
async fn hydrate(
    pool: &SqlitePool,
    rows: Vec<RecipeRow>,
    viewer: &Viewer,
) -> foodgram_shared::Result<Vec<RecipeView>> {
    if rows.is_empty() {
        return Ok(vec![]);
    }

    let ids = rows.iter().map(|row| row.id.to_owned()).collect::<Vec<_>>();

    let statement = SeaQuery::select()
        .column((RecipeIngredient::Table, RecipeIngredient::RecipeId))
        .column((Ingredient::Table, Ingredient::Id))
        .column((Ingredient::Table, Ingredient::Name))
        .column((Ingredient::Table, Ingredient::MeasurementUnit))
        .column((RecipeIngredient::Table, RecipeIngredient::Amount))
        .from(RecipeIngredient::Table)
        .inner_join(
            Ingredient::Table,
            Expr::col((Ingredient::Table, Ingredient::Id))
                .equals((RecipeIngredient::Table, RecipeIngredient::IngredientId)),
        )
        .and_where(Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId)).is_in(ids.clone()))
        .order_by((RecipeIngredient::Table, RecipeIngredient::Position), Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let mut ingredients: HashMap<String, Vec<RecipeIngredientView>> = HashMap::new();
    for row in sqlx::query_as_with::<_, RecipeIngredientRow, _>(&sql, values)
        .fetch_all(pool)
        .await?
    {
        ingredients
            .entry(row.recipe_id)
            .or_default()
            .push(RecipeIngredientView {
                id: row.id,
                name: row.name,
                measurement_unit: row.measurement_unit,
                amount: row.amount,
            });
    }

    let statement = SeaQuery::select()
        .column((RecipeTag::Table, RecipeTag::RecipeId))
        .column((Tag::Table, Tag::Id))
        .column((Tag::Table, Tag::Name))
        .column((Tag::Table, Tag::Color))
        .column((Tag::Table, Tag::Slug))
        .from(RecipeTag::Table)
        .inner_join(
            Tag::Table,
            Expr::col((Tag::Table, Tag::Id)).equals((RecipeTag::Table, RecipeTag::TagId)),
        )
        .and_where(Expr::col((RecipeTag::Table, RecipeTag::RecipeId)).is_in(ids.clone()))
        .order_by((Tag::Table, Tag::Name), Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let mut tags: HashMap<String, Vec<TagView>> = HashMap::new();
    for row in sqlx::query_as_with::<_, RecipeTagRow, _>(&sql, values)
        .fetch_all(pool)
        .await?
    {
        tags.entry(row.recipe_id).or_default().push(TagView {
            id: row.id,
            name: row.name,
            color: row.color,
            slug: row.slug,
        });
    }

    let (favorited, in_cart) = match viewer.user_id() {
        Some(user_id) => (
            fetch_ids(pool, favorited_ids(user_id, ids.clone())).await?,
            fetch_ids(pool, in_cart_ids(user_id, ids)).await?,
        ),
        None => (HashSet::new(), HashSet::new()),
    };

    Ok(rows
        .into_iter()
        .map(|row| RecipeView {
            ingredients: ingredients.remove(&row.id).unwrap_or_default(),
            tags: tags.remove(&row.id).unwrap_or_default(),
            is_favorited: favorited.contains(&row.id),
            is_in_shopping_cart: in_cart.contains(&row.id),
            id: row.id,
            author_id: row.author_id,
            name: row.name,
            image: row.image,
            text: row.text,
            cooking_time: row.cooking_time,
        })
        .collect())
}

fn favorited_ids(user_id: &str, recipe_ids: Vec<String>) -> SelectStatement {
    SeaQuery::select()
        .column(Favorite::RecipeId)
        .from(Favorite::Table)
        .and_where(Expr::col(Favorite::UserId).eq(user_id))
        .and_where(Expr::col(Favorite::RecipeId).is_in(recipe_ids))
        .to_owned()
}

fn in_cart_ids(user_id: &str, recipe_ids: Vec<String>) -> SelectStatement {
    SeaQuery::select()
        .column(ShoppingCart::RecipeId)
        .from(ShoppingCart::Table)
        .and_where(Expr::col(ShoppingCart::UserId).eq(user_id))
        .and_where(Expr::col(ShoppingCart::RecipeId).is_in(recipe_ids))
        .to_owned()
}

async fn fetch_ids(
    pool: &SqlitePool,
    statement: SelectStatement,
) -> foodgram_shared::Result<HashSet<String>> {
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let ids = sqlx::query_scalar_with::<_, String, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(ids.into_iter().collect())
}
