use std::{fs::File, path::PathBuf};

use anyhow::Context;
use foodgram::config::Config;

fn command(pool: sqlx::SqlitePool) -> foodgram_recipe::catalog::Command {
    foodgram_recipe::catalog::Command::new(foodgram_shared::State::new(pool))
}

/// Load a headerless `name,measurement_unit` CSV into the ingredient catalog.
pub async fn import_ingredients(config: &Config, path: PathBuf) -> anyhow::Result<()> {
    let file = File::open(&path).with_context(|| format!("open {}", path.display()))?;

    let pool = foodgram::create_pool(&config.database.url, 1).await?;
    let report = command(pool.clone()).import_ingredients(file).await?;
    pool.close().await;

    tracing::info!(
        created = report.created,
        skipped = report.skipped,
        "ingredients imported from {}",
        path.display()
    );

    Ok(())
}

pub async fn create_tag(
    config: &Config,
    name: String,
    color: String,
    slug: String,
) -> anyhow::Result<()> {
    let pool = foodgram::create_pool(&config.database.url, 1).await?;
    let id = command(pool.clone())
        .create_tag(foodgram_recipe::catalog::CreateTagInput { name, color, slug })
        .await?;
    pool.close().await;

    tracing::info!(tag_id = %id, "tag created");

    Ok(())
}
