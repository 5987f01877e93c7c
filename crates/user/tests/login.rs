use foodgram_shared::Error;
use foodgram_user::{LoginInput, SetPasswordInput};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn login_returns_user() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = foodgram_user::Command::new(state.clone());
    let id = helpers::create_user(&state, "john").await?;

    let user = cmd
        .login(LoginInput {
            email: "john@foodgram.localhost".to_owned(),
            password: "my_password".to_owned(),
        })
        .await?;

    assert_eq!(user.id, id);
    assert_eq!(user.token_version, 0);

    Ok(())
}

#[tokio::test]
async fn login_rejects_bad_credentials() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = foodgram_user::Command::new(state.clone());
    helpers::create_user(&state, "john").await?;

    for (email, password) in [
        ("john@foodgram.localhost", "wrong_password"),
        ("nobody@foodgram.localhost", "my_password"),
    ] {
        let err = cmd
            .login(LoginInput {
                email: email.to_owned(),
                password: password.to_owned(),
            })
            .await
            .unwrap_err();

        let Error::Validate(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.field_errors().contains_key("non_field_errors"));
    }

    Ok(())
}

#[tokio::test]
async fn set_password_requires_current_password() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = foodgram_user::Command::new(state.clone());
    let id = helpers::create_user(&state, "john").await?;

    let err = cmd
        .set_password(
            &id,
            SetPasswordInput {
                current_password: "wrong_password".to_owned(),
                new_password: "new_password".to_owned(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    cmd.set_password(
        &id,
        SetPasswordInput {
            current_password: "my_password".to_owned(),
            new_password: "new_password".to_owned(),
        },
    )
    .await?;

    let user = cmd
        .login(LoginInput {
            email: "john@foodgram.localhost".to_owned(),
            password: "new_password".to_owned(),
        })
        .await?;
    assert_eq!(user.id, id);

    Ok(())
}

#[tokio::test]
async fn logout_revokes_issued_tokens() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = foodgram_user::Command::new(state.clone());
    let id = helpers::create_user(&state, "john").await?;

    cmd.logout(&id).await?;
    cmd.logout(&id).await?;

    let user = cmd
        .login(LoginInput {
            email: "john@foodgram.localhost".to_owned(),
            password: "my_password".to_owned(),
        })
        .await?;
    assert_eq!(user.token_version, 2);

    let err = cmd.logout("01HZX3N5Q8G7V2M4K6P9R1T3W5").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}
