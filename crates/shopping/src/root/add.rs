use foodgram_db::table::ShoppingCart;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository;

impl super::Command {
    pub async fn add(
        &self,
        recipe_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> foodgram_shared::Result<()> {
        let recipe_id = recipe_id.into();
        let user_id = user_id.into();

        if !repository::recipe_exists(&self.read_db, &recipe_id).await? {
            foodgram_shared::not_found!("recipe");
        }

        let statement = Query::insert()
            .into_table(ShoppingCart::Table)
            .columns([
                ShoppingCart::UserId,
                ShoppingCart::RecipeId,
                ShoppingCart::CreatedAt,
            ])
            .values_panic([
                user_id.to_owned().into(),
                recipe_id.to_owned().into(),
                foodgram_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(_) => {}
            Err(err) if foodgram_shared::is_unique_violation(&err) => {
                return Err(foodgram_shared::Error::Conflict(
                    "Recipe is already in the shopping cart.".to_owned(),
                ));
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(recipe_id = %recipe_id, user_id = %user_id, "recipe added to shopping cart");

        Ok(())
    }
}
