use foodgram_db::table::Favorite;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository;

impl super::Command {
    pub async fn unsave(
        &self,
        id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> foodgram_shared::Result<()> {
        let id = id.into();
        let user_id = user_id.into();

        if !repository::exists(&self.read_db, &id).await? {
            foodgram_shared::not_found!("recipe");
        }

        let statement = Query::delete()
            .from_table(Favorite::Table)
            .and_where(Expr::col(Favorite::UserId).eq(user_id.as_str()))
            .and_where(Expr::col(Favorite::RecipeId).eq(id.as_str()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(foodgram_shared::Error::Missing(
                "Recipe is not in favorites.".to_owned(),
            ));
        }

        tracing::info!(recipe_id = %id, user_id = %user_id, "recipe removed from favorites");

        Ok(())
    }
}
