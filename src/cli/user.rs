use clap::ValueEnum;
use foodgram::config::Config;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Role {
    User,
    Admin,
}

impl From<Role> for foodgram_shared::user::Role {
    fn from(role: Role) -> Self {
        match role {
            Role::User => Self::User,
            Role::Admin => Self::Admin,
        }
    }
}

pub async fn set_role(config: &Config, email: String, role: Role) -> anyhow::Result<()> {
    let pool = foodgram::create_pool(&config.database.url, 1).await?;
    let command = foodgram_user::Command::new(foodgram_shared::State::new(pool.clone()));

    let Some(user) = command.find_by_email(&email).await? else {
        tracing::error!("user {email} not found");
        pool.close().await;
        return Ok(());
    };

    command.set_role(user.id, role.into()).await?;
    pool.close().await;

    tracing::info!("{email} role updated");

    Ok(())
}
