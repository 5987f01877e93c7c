use std::ops::Deref;

use foodgram_shared::user::Role;

use crate::repository::{self, FindType, UserRow};

mod login;
mod logout;
mod register;
mod set_password;
mod set_role;

pub use login::LoginInput;
pub use register::RegisterInput;
pub use set_password::SetPasswordInput;

#[derive(Clone)]
pub struct Command {
    state: foodgram_shared::State,
    pub subscription: crate::subscription::Command,
}

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: foodgram_shared::State) -> Self {
        Self {
            subscription: crate::subscription::Command(state.clone()),
            state,
        }
    }

    pub async fn load(&self, id: impl Into<String>) -> foodgram_shared::Result<Option<User>> {
        let user = repository::find(&self.read_db, FindType::Id(id.into())).await?;

        Ok(user.map(User::from))
    }

    pub async fn find_by_email(
        &self,
        email: impl Into<String>,
    ) -> foodgram_shared::Result<Option<User>> {
        let user = repository::find(&self.read_db, FindType::Email(email.into())).await?;

        Ok(user.map(User::from))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
    /// Tokens carrying another version were revoked by a logout.
    pub token_version: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            role: row.role.0,
            token_version: row.token_version,
        }
    }
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
