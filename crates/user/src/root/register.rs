use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use regex::Regex;
use std::sync::LazyLock;
use ulid::Ulid;
use validator::Validate;

use crate::repository;

static RE_USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("valid username regex"));

#[derive(Validate)]
pub struct RegisterInput {
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 150), regex(path = *RE_USERNAME, message = "Letters, digits and @/./+/-/_ only."))]
    pub username: String,
    #[validate(length(min = 1, max = 150))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

impl super::Command {
    pub async fn register(&self, input: RegisterInput) -> foodgram_shared::Result<String> {
        input.validate()?;

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(input.password.as_bytes(), &salt)?
            .to_string();

        let id = Ulid::new().to_string();

        let result = repository::create(
            &self.write_db,
            repository::CreateInput {
                id: id.to_owned(),
                email: input.email,
                username: input.username,
                first_name: input.first_name,
                last_name: input.last_name,
                password: password_hash,
            },
        )
        .await;

        if let Err(err) = result {
            if foodgram_shared::is_unique_violation(&err) {
                let column = foodgram_shared::violated_column(&err).unwrap_or_default();
                if column.ends_with("username") {
                    foodgram_shared::invalid!(
                        "username",
                        "unique",
                        "A user with that username already exists."
                    );
                }

                foodgram_shared::invalid!("email", "unique", "A user with that email already exists.");
            }

            return Err(err.into());
        }

        tracing::info!(user_id = %id, "user registered");

        Ok(id)
    }
}
