use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use std::str::FromStr;
use temp_dir::TempDir;

async fn setup(dir: &TempDir) -> anyhow::Result<SqlitePool> {
    let path = dir.child("db.sqlite3");
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    foodgram_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(pool)
}

fn unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(e) if e.is_unique_violation())
}

#[tokio::test]
async fn ingredient_name_and_unit_are_unique() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = setup(&dir).await?;

    sqlx::query("INSERT INTO ingredient (id, name, measurement_unit) VALUES ('a', 'flour', 'g')")
        .execute(&pool)
        .await?;

    sqlx::query("INSERT INTO ingredient (id, name, measurement_unit) VALUES ('b', 'flour', 'kg')")
        .execute(&pool)
        .await?;

    let err = sqlx::query(
        "INSERT INTO ingredient (id, name, measurement_unit) VALUES ('c', 'flour', 'g')",
    )
    .execute(&pool)
    .await
    .unwrap_err();

    assert!(unique_violation(&err));

    Ok(())
}

#[tokio::test]
async fn deleting_recipe_cascades_to_dependents() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = setup(&dir).await?;

    sqlx::query(
        "INSERT INTO user (id, email, username, first_name, last_name, password, created_at)
         VALUES ('u1', 'john@example.com', 'john', 'John', 'Doe', 'x', 0)",
    )
    .execute(&pool)
    .await?;
    sqlx::query("INSERT INTO ingredient (id, name, measurement_unit) VALUES ('i1', 'egg', 'pcs')")
        .execute(&pool)
        .await?;
    sqlx::query("INSERT INTO tag (id, name, color, slug) VALUES ('t1', 'Breakfast', '#E26C2D', 'breakfast')")
        .execute(&pool)
        .await?;
    sqlx::query(
        "INSERT INTO recipe (id, author_id, name, image, text, cooking_time, created_at)
         VALUES ('r1', 'u1', 'Omelette', '/media/recipes/x.png', 'Whisk', 5, 0)",
    )
    .execute(&pool)
    .await?;
    sqlx::query("INSERT INTO recipe_ingredient (recipe_id, ingredient_id, amount) VALUES ('r1', 'i1', 3)")
        .execute(&pool)
        .await?;
    sqlx::query("INSERT INTO recipe_tag (recipe_id, tag_id) VALUES ('r1', 't1')")
        .execute(&pool)
        .await?;
    sqlx::query("INSERT INTO favorite (user_id, recipe_id, created_at) VALUES ('u1', 'r1', 0)")
        .execute(&pool)
        .await?;
    sqlx::query("INSERT INTO shopping_cart (user_id, recipe_id, created_at) VALUES ('u1', 'r1', 0)")
        .execute(&pool)
        .await?;

    sqlx::query("DELETE FROM recipe WHERE id = 'r1'")
        .execute(&pool)
        .await?;

    for table in ["recipe_ingredient", "recipe_tag", "favorite", "shopping_cart"] {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 0, "{table} rows left behind");
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ingredient")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 1);

    Ok(())
}

#[tokio::test]
async fn favorite_pair_is_unique() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = setup(&dir).await?;

    sqlx::query(
        "INSERT INTO user (id, email, username, first_name, last_name, password, created_at)
         VALUES ('u1', 'john@example.com', 'john', 'John', 'Doe', 'x', 0)",
    )
    .execute(&pool)
    .await?;
    sqlx::query(
        "INSERT INTO recipe (id, author_id, name, image, text, cooking_time, created_at)
         VALUES ('r1', 'u1', 'Omelette', '', 'Whisk', 5, 0)",
    )
    .execute(&pool)
    .await?;

    let insert = "INSERT INTO favorite (user_id, recipe_id, created_at) VALUES ('u1', 'r1', 0)";
    sqlx::query(insert).execute(&pool).await?;
    let err = sqlx::query(insert).execute(&pool).await.unwrap_err();

    assert!(unique_violation(&err));

    Ok(())
}

fn check_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(e) if e.kind() == sqlx::error::ErrorKind::CheckViolation)
}

#[tokio::test]
async fn amounts_and_cooking_time_are_bounded() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = setup(&dir).await?;

    sqlx::query(
        "INSERT INTO user (id, email, username, first_name, last_name, password, created_at)
         VALUES ('u1', 'john@example.com', 'john', 'John', 'Doe', 'x', 0)",
    )
    .execute(&pool)
    .await?;
    sqlx::query("INSERT INTO ingredient (id, name, measurement_unit) VALUES ('i1', 'egg', 'pcs')")
        .execute(&pool)
        .await?;

    for cooking_time in [0, 32_768] {
        let err = sqlx::query(
            "INSERT INTO recipe (id, author_id, name, image, text, cooking_time, created_at)
             VALUES ('r0', 'u1', 'Omelette', '', 'Whisk', ?, 0)",
        )
        .bind(cooking_time)
        .execute(&pool)
        .await
        .unwrap_err();
        assert!(check_violation(&err), "cooking_time {cooking_time}: {err}");
    }

    sqlx::query(
        "INSERT INTO recipe (id, author_id, name, image, text, cooking_time, created_at)
         VALUES ('r1', 'u1', 'Omelette', '', 'Whisk', 32767, 0)",
    )
    .execute(&pool)
    .await?;

    for amount in [0, -3, 32_768] {
        let err = sqlx::query(
            "INSERT INTO recipe_ingredient (recipe_id, ingredient_id, amount) VALUES ('r1', 'i1', ?)",
        )
        .bind(amount)
        .execute(&pool)
        .await
        .unwrap_err();
        assert!(check_violation(&err), "amount {amount}: {err}");
    }

    sqlx::query("INSERT INTO recipe_ingredient (recipe_id, ingredient_id, amount) VALUES ('r1', 'i1', 32767)")
        .execute(&pool)
        .await?;

    Ok(())
}

#[tokio::test]
async fn user_cannot_follow_themselves() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = setup(&dir).await?;

    sqlx::query(
        "INSERT INTO user (id, email, username, first_name, last_name, password, created_at)
         VALUES ('u1', 'john@example.com', 'john', 'John', 'Doe', 'x', 0),
                ('u2', 'jane@example.com', 'jane', 'Jane', 'Doe', 'x', 0)",
    )
    .execute(&pool)
    .await?;

    let err = sqlx::query(
        "INSERT INTO subscription (follower_id, author_id, created_at) VALUES ('u1', 'u1', 0)",
    )
    .execute(&pool)
    .await
    .unwrap_err();
    assert!(check_violation(&err));

    sqlx::query("INSERT INTO subscription (follower_id, author_id, created_at) VALUES ('u1', 'u2', 0)")
        .execute(&pool)
        .await?;

    Ok(())
}
