use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use foodgram_shared::Viewer;

use crate::{error::AppError, routes::AppState};

pub const AUTH_COOKIE_NAME: &str = "auth_token";

pub fn build_cookie<'a>(token: String) -> Cookie<'a> {
    Cookie::build((AUTH_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build()
}

/// `Authorization: Token <jwt>` or `Bearer <jwt>`, then the auth cookie.
fn extract_token(parts: &Parts) -> Option<String> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split_once(' '))
        .filter(|(scheme, _)| {
            scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer")
        })
        .map(|(_, token)| token.trim().to_owned());

    header.or_else(|| {
        CookieJar::from_headers(&parts.headers)
            .get(AUTH_COOKIE_NAME)
            .map(|cookie| cookie.value().to_owned())
    })
}

async fn resolve(token: &str, state: &AppState) -> Result<foodgram_user::User, AppError> {
    let claims = foodgram_user::validate_jwt(token, &state.config.jwt.secret).map_err(|err| {
        tracing::debug!(error = %err, "rejected token");
        AppError::unauthorized()
    })?;

    let user = state
        .user_command
        .load(claims.sub)
        .await?
        .ok_or_else(AppError::unauthorized)?;

    if user.token_version != claims.ver {
        tracing::debug!(user_id = %user.id, "revoked token");
        return Err(AppError::unauthorized());
    }

    Ok(user)
}

/// Authenticated user, rejects with 401.
pub struct AuthUser(pub foodgram_user::User);

impl AuthUser {
    pub fn viewer(&self) -> Viewer {
        Viewer::user(self.0.id.to_owned())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts).ok_or_else(AppError::unauthorized)?;

        Ok(AuthUser(resolve(&token, state).await?))
    }
}

/// Identity for read endpoints. No credentials means anonymous, bad
/// credentials are still a 401.
pub struct MaybeAuth(pub Viewer);

impl FromRequestParts<AppState> for MaybeAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_token(parts) else {
            return Ok(MaybeAuth(Viewer::Anonymous));
        };

        let user = resolve(&token, state).await?;

        Ok(MaybeAuth(Viewer::user(user.id)))
    }
}
