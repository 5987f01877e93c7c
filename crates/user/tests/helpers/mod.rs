use std::{path::PathBuf, str::FromStr};

use foodgram_user::RegisterInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<foodgram_shared::State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    foodgram_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(foodgram_shared::State::new(pool))
}

#[allow(dead_code)]
pub fn register_input(name: &str) -> RegisterInput {
    RegisterInput {
        email: format!("{name}@foodgram.localhost"),
        username: name.to_owned(),
        first_name: name.to_owned(),
        last_name: "Doe".to_owned(),
        password: "my_password".to_owned(),
    }
}

#[allow(dead_code)]
pub async fn create_user(
    state: &foodgram_shared::State,
    name: impl Into<String>,
) -> anyhow::Result<String> {
    let ids = create_users(state, vec![name]).await?;

    Ok(ids.first().unwrap().to_owned())
}

#[allow(dead_code)]
pub async fn create_users(
    state: &foodgram_shared::State,
    names: impl IntoIterator<Item = impl Into<String>>,
) -> anyhow::Result<Vec<String>> {
    let command = foodgram_user::Command::new(state.clone());

    let mut ids = vec![];
    for name in names.into_iter() {
        let name = name.into();
        let id = command.register(register_input(&name)).await?;
        ids.push(id);
    }

    Ok(ids)
}
