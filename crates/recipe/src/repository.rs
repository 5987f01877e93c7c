use foodgram_db::table::{Recipe, User};
use foodgram_shared::user::Role;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, SqlitePool, prelude::FromRow};

#[derive(FromRow)]
pub struct RecipeRow {
    pub id: String,
    pub author_id: String,
}

pub(crate) async fn find(pool: &SqlitePool, id: &str) -> foodgram_shared::Result<Option<RecipeRow>> {
    let statement = Query::select()
        .columns([Recipe::Id, Recipe::AuthorId])
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn exists(pool: &SqlitePool, id: &str) -> foodgram_shared::Result<bool> {
    Ok(find(pool, id).await?.is_some())
}

pub(crate) async fn is_admin(pool: &SqlitePool, user_id: &str) -> foodgram_shared::Result<bool> {
    let statement = Query::select()
        .column(User::Role)
        .from(User::Table)
        .and_where(Expr::col(User::Id).eq(user_id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let role = sqlx::query_scalar_with::<_, sqlx::types::Text<Role>, _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(role.is_some_and(|role| role.0 == Role::Admin))
}

pub(crate) async fn image_in_use(pool: &SqlitePool, image: &str) -> foodgram_shared::Result<bool> {
    let statement = Query::select()
        .column(Recipe::Id)
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::Image).eq(image))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let found = sqlx::query_scalar_with::<_, String, _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}

pub(crate) struct CreateInput {
    pub id: String,
    pub author_id: String,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
}

pub(crate) async fn create(
    conn: &mut SqliteConnection,
    input: CreateInput,
) -> foodgram_shared::Result<()> {
    let now = foodgram_shared::now();
    let statement = Query::insert()
        .into_table(Recipe::Table)
        .columns([
            Recipe::Id,
            Recipe::AuthorId,
            Recipe::Name,
            Recipe::Image,
            Recipe::Text,
            Recipe::CookingTime,
            Recipe::CreatedAt,
            Recipe::UpdatedAt,
        ])
        .values_panic([
            input.id.into(),
            input.author_id.into(),
            input.name.into(),
            input.image.into(),
            input.text.into(),
            input.cooking_time.into(),
            now.into(),
            now.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

pub(crate) struct UpdateInput {
    pub id: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i64>,
}

pub(crate) async fn update(
    conn: &mut SqliteConnection,
    input: UpdateInput,
) -> foodgram_shared::Result<()> {
    let mut statement = Query::update()
        .table(Recipe::Table)
        .value(Recipe::UpdatedAt, foodgram_shared::now())
        .and_where(Expr::col(Recipe::Id).eq(input.id))
        .to_owned();

    if let Some(name) = input.name {
        statement.value(Recipe::Name, name);
    }

    if let Some(image) = input.image {
        statement.value(Recipe::Image, image);
    }

    if let Some(text) = input.text {
        statement.value(Recipe::Text, text);
    }

    if let Some(cooking_time) = input.cooking_time {
        statement.value(Recipe::CookingTime, cooking_time);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

pub(crate) async fn delete(pool: &SqlitePool, id: &str) -> foodgram_shared::Result<u64> {
    let statement = Query::delete()
        .from_table(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.rows_affected())
}
