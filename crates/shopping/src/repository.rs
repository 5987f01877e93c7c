use foodgram_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;

pub(crate) async fn recipe_exists(pool: &SqlitePool, id: &str) -> foodgram_shared::Result<bool> {
    let statement = Query::select()
        .column(Recipe::Id)
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_with(&sql, values)
        .fetch_optional(pool)
        .await?
        .is_some())
}
