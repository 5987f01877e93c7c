use foodgram_db::table::Ingredient;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use ulid::Ulid;
use validator::Validate;

#[derive(Validate)]
pub struct CreateIngredientInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub measurement_unit: String,
}

impl super::Command {
    pub async fn create_ingredient(
        &self,
        input: CreateIngredientInput,
    ) -> foodgram_shared::Result<String> {
        input.validate()?;

        let id = Ulid::new().to_string();
        let statement = Query::insert()
            .into_table(Ingredient::Table)
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .values_panic([
                id.to_owned().into(),
                input.name.into(),
                input.measurement_unit.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(_) => Ok(id),
            Err(err) if foodgram_shared::is_unique_violation(&err) => Err(
                foodgram_shared::Error::Conflict("Ingredient already exists.".to_owned()),
            ),
            Err(err) => Err(err.into()),
        }
    }
}
