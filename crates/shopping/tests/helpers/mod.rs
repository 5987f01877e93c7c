use std::{str::FromStr, sync::Arc};

use foodgram_recipe::{
    CreateInput, FsImageStore, IngredientAmount, catalog::CreateIngredientInput,
    catalog::CreateTagInput,
};
use foodgram_user::RegisterInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use temp_dir::TempDir;

pub struct TestState {
    pub state: foodgram_shared::State,
    pub recipe: foodgram_recipe::Command,
    pub command: foodgram_shopping::Command,
    pub query: foodgram_shopping::Query,
    pub tag: String,
}

pub async fn setup_test_state(dir: &TempDir) -> anyhow::Result<TestState> {
    let path = dir.child("db.sqlite3");
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    foodgram_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    let state = foodgram_shared::State::new(pool);
    let recipe = foodgram_recipe::Command::new(
        state.clone(),
        Arc::new(FsImageStore::new(dir.child("media"), "/media")),
    );

    let tag = recipe
        .catalog
        .create_tag(CreateTagInput {
            name: "Breakfast".to_owned(),
            color: "#E26C2D".to_owned(),
            slug: "breakfast".to_owned(),
        })
        .await?;

    Ok(TestState {
        command: foodgram_shopping::Command::new(state.clone()),
        query: foodgram_shopping::Query(state.clone()),
        recipe,
        state,
        tag,
    })
}

pub async fn create_user(state: &TestState, name: &str) -> anyhow::Result<String> {
    Ok(foodgram_user::Command::new(state.state.clone())
        .register(RegisterInput {
            email: format!("{name}@foodgram.localhost"),
            username: name.to_owned(),
            first_name: name.to_owned(),
            last_name: "Doe".to_owned(),
            password: "my_password".to_owned(),
        })
        .await?)
}

pub async fn create_ingredient(state: &TestState, name: &str, unit: &str) -> anyhow::Result<String> {
    Ok(state
        .recipe
        .catalog
        .create_ingredient(CreateIngredientInput {
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        })
        .await?)
}

pub async fn create_recipe(
    state: &TestState,
    name: &str,
    ingredients: Vec<(&str, i64)>,
    author_id: &str,
) -> anyhow::Result<String> {
    Ok(state
        .recipe
        .create(
            CreateInput {
                name: name.to_owned(),
                image: "data:image/png;base64,iVBORw0KGgo=".to_owned(),
                text: format!("How to cook {name}"),
                cooking_time: 10,
                ingredients: ingredients
                    .into_iter()
                    .map(|(id, amount)| IngredientAmount::new(id, amount))
                    .collect(),
                tags: vec![state.tag.to_owned()],
            },
            author_id,
        )
        .await?)
}
