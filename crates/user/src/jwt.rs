use anyhow::{Context, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user_id
    /// `token_version` of the user when issued.
    pub ver: i64,
    pub exp: usize,
    pub iat: usize,
}

/// Issue an HS256 token for a user, valid for `expiration_days`.
pub fn generate_jwt(
    user_id: impl Into<String>,
    token_version: i64,
    secret: &str,
    expiration_days: u64,
) -> Result<String> {
    let now = usize::try_from(foodgram_shared::now()).context("Negative unix timestamp")?;
    let expiration = now + (expiration_days * 24 * 60 * 60) as usize;

    let claims = Claims {
        sub: user_id.into(),
        ver: token_version,
        exp: expiration,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT")
}

/// Validate and decode a token, rejecting expired ones.
pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT")?;

    Ok(token_data.claims)
}
