use std::{str::FromStr, sync::Arc, time::Duration};

use foodgram_recipe::{
    CreateInput, FsImageStore, IngredientAmount,
    catalog::{CreateIngredientInput, CreateTagInput},
};
use foodgram_user::RegisterInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use temp_dir::TempDir;

pub const IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

pub struct TestState {
    pub state: foodgram_shared::State,
    pub command: foodgram_recipe::Command,
    pub query: foodgram_recipe::Query,
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
    let images = Arc::new(FsImageStore::new(dir.child("media"), "/media"));

    Ok(TestState {
        command: foodgram_recipe::Command::new(state.clone(), images),
        query: foodgram_recipe::Query(state.clone()),
        state,
    })
}

#[allow(dead_code)]
pub async fn create_user(state: &TestState, name: &str) -> anyhow::Result<String> {
    let command = foodgram_user::Command::new(state.state.clone());

    Ok(command
        .register(RegisterInput {
            email: format!("{name}@foodgram.localhost"),
            username: name.to_owned(),
            first_name: name.to_owned(),
            last_name: "Doe".to_owned(),
            password: "my_password".to_owned(),
        })
        .await?)
}

#[allow(dead_code)]
pub struct Catalog {
    pub flour: String,
    pub sugar: String,
    pub egg: String,
    pub breakfast: String,
    pub dinner: String,
}

#[allow(dead_code)]
pub async fn seed_catalog(state: &TestState) -> anyhow::Result<Catalog> {
    let catalog = &state.command.catalog;

    let mut ingredients = vec![];
    for (name, unit) in [("Flour", "g"), ("Sugar", "g"), ("Egg", "pcs")] {
        ingredients.push(
            catalog
                .create_ingredient(CreateIngredientInput {
                    name: name.to_owned(),
                    measurement_unit: unit.to_owned(),
                })
                .await?,
        );
    }

    let mut tags = vec![];
    for (name, color, slug) in [("Breakfast", "#E26C2D", "breakfast"), ("Dinner", "#8775D2", "dinner")] {
        tags.push(
            catalog
                .create_tag(CreateTagInput {
                    name: name.to_owned(),
                    color: color.to_owned(),
                    slug: slug.to_owned(),
                })
                .await?,
        );
    }

    Ok(Catalog {
        flour: ingredients[0].to_owned(),
        sugar: ingredients[1].to_owned(),
        egg: ingredients[2].to_owned(),
        breakfast: tags[0].to_owned(),
        dinner: tags[1].to_owned(),
    })
}

#[allow(dead_code)]
pub fn recipe_input(
    name: &str,
    ingredients: Vec<IngredientAmount>,
    tags: Vec<String>,
) -> CreateInput {
    CreateInput {
        name: name.to_owned(),
        image: IMAGE.to_owned(),
        text: format!("How to cook {name}"),
        cooking_time: 15,
        ingredients,
        tags,
    }
}

/// Creates recipes a few milliseconds apart so their ids sort by creation.
#[allow(dead_code)]
pub async fn create_recipes(
    state: &TestState,
    inputs: impl IntoIterator<Item = CreateInput>,
    author_id: &str,
) -> anyhow::Result<Vec<String>> {
    let mut ids = vec![];
    for input in inputs {
        ids.push(state.command.create(input, author_id).await?);
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    Ok(ids)
}
