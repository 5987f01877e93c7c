use foodgram_recipe::{IngredientAmount, UpdateInput};
use foodgram_shared::{Error, Viewer, user::Role};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_update_replaces_associations() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(&dir).await?;
    let catalog = helpers::seed_catalog(&state).await?;
    let john = helpers::create_user(&state, "john").await?;

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

    state
        .command
        .update(
            &id,
            UpdateInput {
                cooking_time: Some(30),
                ingredients: vec![
                    IngredientAmount::new(&catalog.egg, 2),
                    IngredientAmount::new(&catalog.sugar, 10),
                ],
                tags: vec![catalog.dinner.to_owned()],
                ..Default::default()
            },
            &john,
        )
        .await?;

    let recipe = state.query.find_recipe(&id, &Viewer::Anonymous).await?.unwrap();
    assert_eq!(recipe.name, "Pancakes");
    assert_eq!(recipe.cooking_time, 30);

    let ingredients = recipe
        .ingredients
        .iter()
        .map(|i| (i.name.as_str(), i.amount))
        .collect::<Vec<_>>();
    assert_eq!(ingredients, vec![("Egg", 2), ("Sugar", 10)]);

    let tags = recipe.tags.iter().map(|t| t.slug.as_str()).collect::<Vec<_>>();
    assert_eq!(tags, vec!["dinner"]);

    Ok(())
}

#[tokio::test]
async fn test_update_with_empty_ingredients_keeps_previous_set() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(&dir).await?;
    let catalog = helpers::seed_catalog(&state).await?;
    let john = helpers::create_user(&state, "john").await?;

    let id = state
        .command
        .create(
            helpers::recipe_input(
                "Pancakes",
                vec![
                    IngredientAmount::new(&catalog.flour, 200),
                    IngredientAmount::new(&catalog.egg, 2),
                ],
                vec![catalog.breakfast.to_owned()],
            ),
            &john,
        )
        .await?;

    let err = state
        .command
        .update(
            &id,
            UpdateInput {
                name: Some("Crepes".to_owned()),
                ingredients: vec![],
                tags: vec![catalog.dinner.to_owned()],
                ..Default::default()
            },
            &john,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    let err = state
        .command
        .update(
            &id,
            UpdateInput {
                ingredients: vec![IngredientAmount::new(&catalog.sugar, 5)],
                tags: vec!["01HZX3N5Q8G7V2M4K6P9R1T3W5".to_owned()],
                ..Default::default()
            },
            &john,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    let recipe = state.query.find_recipe(&id, &Viewer::Anonymous).await?.unwrap();
    assert_eq!(recipe.name, "Pancakes");
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.ingredients[0].name, "Flour");
    assert_eq!(recipe.tags[0].slug, "breakfast");

    Ok(())
}

#[tokio::test]
async fn test_only_author_can_update() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(&dir).await?;
    let catalog = helpers::seed_catalog(&state).await?;
    let john = helpers::create_user(&state, "john").await?;
    let albert = helpers::create_user(&state, "albert").await?;
    foodgram_user::Command::new(state.state.clone())
        .set_role(&albert, Role::Admin)
        .await?;

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

    let input = || UpdateInput {
        ingredients: vec![IngredientAmount::new(&catalog.flour, 100)],
        tags: vec![catalog.breakfast.to_owned()],
        ..Default::default()
    };

    let err = state.command.update(&id, input(), &albert).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let err = state
        .command
        .update("01HZX3N5Q8G7V2M4K6P9R1T3W5", input(), &john)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}
