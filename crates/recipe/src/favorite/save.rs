use foodgram_db::table::Favorite;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository;

impl super::Command {
    pub async fn save(
        &self,
        id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> foodgram_shared::Result<()> {
        let id = id.into();
        let user_id = user_id.into();

        if !repository::exists(&self.read_db, &id).await? {
            foodgram_shared::not_found!("recipe");
        }

        let statement = Query::insert()
            .into_table(Favorite::Table)
            .columns([Favorite::UserId, Favorite::RecipeId, Favorite::CreatedAt])
            .values_panic([
                user_id.to_owned().into(),
                id.to_owned().into(),
                foodgram_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(_) => {}
            Err(err) if foodgram_shared::is_unique_violation(&err) => {
                return Err(foodgram_shared::Error::Conflict(
                    "Recipe is already in favorites.".to_owned(),
                ));
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(recipe_id = %id, user_id = %user_id, "recipe saved to favorites");

        Ok(())
    }
}
