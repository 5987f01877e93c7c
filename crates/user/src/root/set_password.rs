use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use validator::Validate;

use crate::repository::{self, FindType};

#[derive(Validate)]
pub struct SetPasswordInput {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

impl super::Command {
    pub async fn set_password(
        &self,
        id: impl Into<String>,
        input: SetPasswordInput,
    ) -> foodgram_shared::Result<()> {
        input.validate()?;

        let Some(user_row) = repository::find(&self.read_db, FindType::Id(id.into())).await?
        else {
            foodgram_shared::not_found!("user");
        };

        let argon2 = Argon2::default();
        let parsed_hash = PasswordHash::new(&user_row.password)?;

        if argon2
            .verify_password(input.current_password.as_bytes(), &parsed_hash)
            .is_err()
        {
            foodgram_shared::invalid!("current_password", "invalid", "Invalid password.");
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = argon2
            .hash_password(input.new_password.as_bytes(), &salt)?
            .to_string();

        repository::update(
            &self.write_db,
            repository::UpdateInput {
                id: user_row.id,
                password: Some(password_hash),
                role: None,
            },
        )
        .await?;

        Ok(())
    }
}
