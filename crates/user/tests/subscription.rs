use foodgram_shared::{Error, Viewer};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn subscribe_toggle() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = foodgram_user::Command::new(state.clone());
    let query = foodgram_user::Query(state.clone());
    let ids = helpers::create_users(&state, ["john", "albert"]).await?;
    let (john, albert) = (&ids[0], &ids[1]);

    cmd.subscription.subscribe(john, albert).await?;
    assert!(query.is_subscribed(albert, &Viewer::user(john)).await?);
    assert!(!query.is_subscribed(john, &Viewer::user(albert)).await?);

    let err = cmd.subscription.subscribe(john, albert).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    cmd.subscription.unsubscribe(john, albert).await?;
    assert!(!query.is_subscribed(albert, &Viewer::user(john)).await?);

    let err = cmd.subscription.unsubscribe(john, albert).await.unwrap_err();
    assert!(matches!(err, Error::Missing(_)));

    Ok(())
}

#[tokio::test]
async fn cannot_subscribe_to_self() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = foodgram_user::Command::new(state.clone());
    let john = helpers::create_user(&state, "john").await?;

    let err = cmd.subscription.subscribe(&john, &john).await.unwrap_err();
    let Error::Validate(errors) = err else {
        panic!("expected validation error");
    };
    assert!(errors.field_errors().contains_key("author"));

    Ok(())
}

#[tokio::test]
async fn subscribe_to_unknown_author() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = foodgram_user::Command::new(state.clone());
    let john = helpers::create_user(&state, "john").await?;

    let err = cmd
        .subscription
        .subscribe(&john, "01HZX3N5Q8G7V2M4K6P9R1T3W5")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn list_users_with_subscription_flag() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = foodgram_user::Command::new(state.clone());
    let query = foodgram_user::Query(state.clone());
    let ids = helpers::create_users(&state, ["john", "albert", "marie"]).await?;

    cmd.subscription.subscribe(&ids[0], &ids[2]).await?;

    let users = query.list_users(&Viewer::user(&ids[0])).await?;
    let names = users
        .iter()
        .map(|u| (u.username.as_str(), u.is_subscribed))
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![("albert", false), ("john", false), ("marie", true)]
    );

    let users = query.list_users(&Viewer::Anonymous).await?;
    assert!(users.iter().all(|u| !u.is_subscribed));

    let followed = query.list_subscriptions(&Viewer::user(&ids[0])).await?;
    assert_eq!(followed.len(), 1);
    assert_eq!(followed[0].id, ids[2]);
    assert!(followed[0].is_subscribed);

    assert!(query.list_subscriptions(&Viewer::Anonymous).await?.is_empty());

    let marie = query.find_user(&ids[2], &Viewer::Anonymous).await?.unwrap();
    assert!(!marie.is_subscribed);

    Ok(())
}
