use argon2::{Argon2, PasswordHash, PasswordVerifier};
use validator::Validate;

use crate::repository::{self, FindType};

#[derive(Validate)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl super::Command {
    /// Checks credentials and returns the user a token is issued for.
    pub async fn login(&self, input: LoginInput) -> foodgram_shared::Result<super::User> {
        input.validate()?;

        let Some(user_row) = repository::find(&self.read_db, FindType::Email(input.email)).await?
        else {
            foodgram_shared::invalid!(
                "non_field_errors",
                "credentials",
                "Unable to log in with provided credentials."
            );
        };

        let parsed_hash = PasswordHash::new(&user_row.password)?;
        let argon2 = Argon2::default();

        if argon2
            .verify_password(input.password.as_bytes(), &parsed_hash)
            .is_err()
        {
            foodgram_shared::invalid!(
                "non_field_errors",
                "credentials",
                "Unable to log in with provided credentials."
            );
        }

        Ok(user_row.into())
    }
}
