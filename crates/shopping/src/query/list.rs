use foodgram_db::table::{Ingredient, RecipeIngredient, ShoppingCart};
use sea_query::{Alias, Expr, ExprTrait, Func, Order, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::{ShoppingListItem, render};

impl super::Query {
    /// Ingredients of every recipe in the user's cart, summed per
    /// `(name, measurement_unit)` and ordered by name then unit.
    pub async fn aggregate_shopping_list(
        &self,
        user_id: &str,
    ) -> foodgram_shared::Result<Vec<ShoppingListItem>> {
        let statement = SeaQuery::select()
            .column((Ingredient::Table, Ingredient::Name))
            .column((Ingredient::Table, Ingredient::MeasurementUnit))
            .expr_as(
                Func::sum(Expr::col((RecipeIngredient::Table, RecipeIngredient::Amount))),
                Alias::new("total_amount"),
            )
            .from(ShoppingCart::Table)
            .inner_join(
                RecipeIngredient::Table,
                Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId))
                    .equals((ShoppingCart::Table, ShoppingCart::RecipeId)),
            )
            .inner_join(
                Ingredient::Table,
                Expr::col((Ingredient::Table, Ingredient::Id))
                    .equals((RecipeIngredient::Table, RecipeIngredient::IngredientId)),
            )
            .and_where(Expr::col((ShoppingCart::Table, ShoppingCart::UserId)).eq(user_id))
            .group_by_col((Ingredient::Table, Ingredient::Name))
            .group_by_col((Ingredient::Table, Ingredient::MeasurementUnit))
            .order_by((Ingredient::Table, Ingredient::Name), Order::Asc)
            .order_by((Ingredient::Table, Ingredient::MeasurementUnit), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ShoppingListItem, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    pub async fn export_shopping_list(&self, user_id: &str) -> foodgram_shared::Result<String> {
        let items = self.aggregate_shopping_list(user_id).await?;

        Ok(render(&items))
    }
}
