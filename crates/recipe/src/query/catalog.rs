use foodgram_db::table::{Ingredient, Tag};
use sea_query::{Expr, ExprTrait, LikeExpr, Order, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TagView {
    pub id: String,
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct IngredientView {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
}

impl super::Query {
    pub async fn list_tags(&self) -> foodgram_shared::Result<Vec<TagView>> {
        let statement = SeaQuery::select()
            .columns([Tag::Id, Tag::Name, Tag::Color, Tag::Slug])
            .from(Tag::Table)
            .order_by(Tag::Name, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagView, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    pub async fn find_tag(&self, id: &str) -> foodgram_shared::Result<Option<TagView>> {
        let statement = SeaQuery::select()
            .columns([Tag::Id, Tag::Name, Tag::Color, Tag::Slug])
            .from(Tag::Table)
            .and_where(Expr::col(Tag::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagView, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    /// Ingredients ordered by name, optionally narrowed to a case-insensitive
    /// name prefix.
    pub async fn search_ingredients(
        &self,
        name: Option<&str>,
    ) -> foodgram_shared::Result<Vec<IngredientView>> {
        let mut statement = SeaQuery::select()
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .from(Ingredient::Table)
            .order_by(Ingredient::Name, Order::Asc)
            .order_by(Ingredient::MeasurementUnit, Order::Asc)
            .to_owned();

        let name = name.map(str::trim).filter(|name| !name.is_empty());

        if let Some(name) = name.filter(|name| name.is_ascii()) {
            let pattern = name
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            statement.and_where(
                Expr::col(Ingredient::Name)
                    .like(LikeExpr::new(format!("{pattern}%")).escape('\\')),
            );
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let mut ingredients = sqlx::query_as_with::<_, IngredientView, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        // SQLite LIKE only folds ASCII case.
        if let Some(name) = name.filter(|name| !name.is_ascii()) {
            let prefix = name.to_lowercase();
            ingredients.retain(|i| i.name.to_lowercase().starts_with(&prefix));
        }

        Ok(ingredients)
    }

    pub async fn find_ingredient(&self, id: &str) -> foodgram_shared::Result<Option<IngredientView>> {
        let statement = SeaQuery::select()
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, IngredientView, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }
}
