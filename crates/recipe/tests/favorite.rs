use foodgram_recipe::{IngredientAmount, RecipeFilter};
use foodgram_shared::{Error, Viewer};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_favorite_toggle() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(&dir).await?;
    let catalog = helpers::seed_catalog(&state).await?;
    let john = helpers::create_user(&state, "john").await?;
    let albert = helpers::create_user(&state, "albert").await?;

    let id = state
        .command
        .create(
            helpers::recipe_input(
                "Pancakes",
                vec![IngredientAmount::new(&catalog.flour, 200)],
                vec![catalog.breakfast.to_owned()],
            ),
            &john,
        )
        .await?;

    state.command.favorite.save(&id, &albert).await?;
    assert!(state.query.is_favorited(&id, &Viewer::user(&albert)).await?);
    assert!(!state.query.is_favorited(&id, &Viewer::user(&john)).await?);
    assert!(!state.query.is_favorited(&id, &Viewer::Anonymous).await?);

    let recipe = state.query.find_recipe(&id, &Viewer::user(&albert)).await?.unwrap();
    assert!(recipe.is_favorited);
    assert!(!recipe.is_in_shopping_cart);

    let err = state.command.favorite.save(&id, &albert).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    state.command.favorite.unsave(&id, &albert).await?;
    assert!(!state.query.is_favorited(&id, &Viewer::user(&albert)).await?);

    let err = state.command.favorite.unsave(&id, &albert).await.unwrap_err();
    assert!(matches!(err, Error::Missing(_)));

    Ok(())
}

#[tokio::test]
async fn test_favorite_unknown_recipe() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(&dir).await?;
    let john = helpers::create_user(&state, "john").await?;

    let err = state
        .command
        .favorite
        .save("01HZX3N5Q8G7V2M4K6P9R1T3W5", &john)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = state
        .command
        .favorite
        .unsave("01HZX3N5Q8G7V2M4K6P9R1T3W5", &john)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_filter_favorited() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(&dir).await?;
    let catalog = helpers::seed_catalog(&state).await?;
    let john = helpers::create_user(&state, "john").await?;

    let ids = helpers::create_recipes(
        &state,
        ["Pancakes", "Omelette", "Waffles"].map(|name| {
            helpers::recipe_input(
                name,
                vec![IngredientAmount::new(&catalog.egg, 2)],
                vec![catalog.breakfast.to_owned()],
            )
        }),
        &john,
    )
    .await?;

    state.command.favorite.save(&ids[0], &john).await?;
    state.command.favorite.save(&ids[2], &john).await?;

    let filter = RecipeFilter {
        is_favorited: true,
        ..Default::default()
    };

    let recipes = state.query.filter(&filter, &Viewer::user(&john), 0, 100).await?;
    let names = recipes.iter().map(|r| r.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["Waffles", "Pancakes"]);
    assert!(recipes.iter().all(|r| r.is_favorited));

    assert!(state.query.filter(&filter, &Viewer::Anonymous, 0, 100).await?.is_empty());

    Ok(())
}
