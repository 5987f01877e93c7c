use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sqlx::SqlitePool;
use tower_http::services::ServeDir;

mod auth;
mod dto;
mod health;
mod ingredients;
mod json;
mod pagination;
mod recipes;
mod tags;
mod users;

pub use dto::*;
pub use json::JsonBody;
pub use pagination::{Page, PageParams};

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub user_command: foodgram_user::Command,
    pub user_query: foodgram_user::Query,
    pub recipe_command: foodgram_recipe::Command,
    pub recipe_query: foodgram_recipe::Query,
    pub shopping_command: foodgram_shopping::Command,
    pub shopping_query: foodgram_shopping::Query,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(config: crate::config::Config, state: foodgram_shared::State) -> Self {
        let images = Arc::new(foodgram_recipe::FsImageStore::new(
            &config.media.root,
            &config.media.url,
        ));

        Self {
            user_command: foodgram_user::Command::new(state.clone()),
            user_query: foodgram_user::Query(state.clone()),
            recipe_command: foodgram_recipe::Command::new(state.clone(), images),
            recipe_query: foodgram_recipe::Query(state.clone()),
            shopping_command: foodgram_shopping::Command::new(state.clone()),
            shopping_query: foodgram_shopping::Query(state.clone()),
            pool: state.read_db,
            config,
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    let media = ServeDir::new(&app_state.config.media.root);

    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/api/users/", get(users::index::list).post(users::index::register))
        .route("/api/users/me/", get(users::index::me))
        .route("/api/users/set_password/", post(users::index::set_password))
        .route("/api/users/subscriptions/", get(users::subscriptions::list))
        .route("/api/users/{id}/", get(users::index::detail))
        .route(
            "/api/users/{id}/subscribe/",
            post(users::subscriptions::subscribe).delete(users::subscriptions::unsubscribe),
        )
        .route("/api/auth/token/login/", post(auth::login))
        .route("/api/auth/token/logout/", post(auth::logout))
        .route("/api/tags/", get(tags::list))
        .route("/api/tags/{id}/", get(tags::detail))
        .route("/api/ingredients/", get(ingredients::list))
        .route("/api/ingredients/{id}/", get(ingredients::detail))
        .route(
            "/api/recipes/",
            get(recipes::index::list).post(recipes::index::create),
        )
        .route(
            "/api/recipes/download_shopping_cart/",
            get(recipes::shopping_cart::download),
        )
        .route(
            "/api/recipes/{id}/",
            get(recipes::detail::page)
                .patch(recipes::detail::update)
                .delete(recipes::detail::delete),
        )
        .route(
            "/api/recipes/{id}/favorite/",
            post(recipes::favorite::add).delete(recipes::favorite::remove),
        )
        .route(
            "/api/recipes/{id}/shopping_cart/",
            post(recipes::shopping_cart::add).delete(recipes::shopping_cart::remove),
        )
        .nest_service("/media", media)
        .with_state(app_state)
}
