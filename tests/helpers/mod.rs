#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use foodgram::{
    config::{
        Config, DatabaseConfig, JwtConfig, MediaConfig, ObservabilityConfig, PaginationConfig,
        ServerConfig,
    },
    routes::AppState,
};
use foodgram_recipe::catalog::{CreateIngredientInput, CreateTagInput};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::migrate::MigrateDatabase;
use temp_dir::TempDir;
use tower::ServiceExt;

pub const IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    _dir: TempDir,
}

pub struct Response {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub text: String,
}

impl Response {
    pub fn json(&self) -> Value {
        if self.text.is_empty() {
            return Value::Null;
        }

        serde_json::from_str(&self.text).unwrap()
    }
}

pub async fn setup() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}", dir.child("db.sqlite3").display());
    sqlx::Sqlite::create_database(&url).await?;

    let pool = foodgram::create_pool(&url, 4).await?;
    foodgram::migrate(&pool).await?;

    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
        },
        database: DatabaseConfig {
            url,
            max_connections: 4,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_string(),
            expiration_days: 1,
        },
        media: MediaConfig {
            root: dir.child("media").display().to_string(),
            url: "/media".to_string(),
        },
        pagination: PaginationConfig { default_limit: 6 },
        observability: ObservabilityConfig::default(),
    };

    let state = AppState::new(config, foodgram_shared::State::new(pool));

    Ok(TestApp {
        app: foodgram::router(state.clone()),
        state,
        _dir: dir,
    })
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Token {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        Response {
            status,
            headers,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Response {
        self.send(Method::DELETE, uri, token, None).await
    }

    /// Register through the API, returns the new user id.
    pub async fn register(&self, name: &str) -> String {
        let response = self
            .post(
                "/api/users/",
                None,
                json!({
                    "email": format!("{name}@foodgram.localhost"),
                    "username": name,
                    "first_name": name,
                    "last_name": "Doe",
                    "password": "my_password",
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);

        response.json()["id"].as_str().unwrap().to_owned()
    }

    pub async fn login(&self, name: &str) -> String {
        let response = self
            .post(
                "/api/auth/token/login/",
                None,
                json!({
                    "email": format!("{name}@foodgram.localhost"),
                    "password": "my_password",
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);

        response.json()["auth_token"].as_str().unwrap().to_owned()
    }

    /// Register and log in, returns `(id, token)`.
    pub async fn user(&self, name: &str) -> (String, String) {
        let id = self.register(name).await;
        let token = self.login(name).await;

        (id, token)
    }

    pub async fn ingredient(&self, name: &str, unit: &str) -> String {
        self.state
            .recipe_command
            .catalog
            .create_ingredient(CreateIngredientInput {
                name: name.to_owned(),
                measurement_unit: unit.to_owned(),
            })
            .await
            .unwrap()
    }

    pub async fn tag(&self, name: &str, color: &str, slug: &str) -> String {
        self.state
            .recipe_command
            .catalog
            .create_tag(CreateTagInput {
                name: name.to_owned(),
                color: color.to_owned(),
                slug: slug.to_owned(),
            })
            .await
            .unwrap()
    }

    /// POST a recipe, returns its id.
    pub async fn recipe(
        &self,
        token: &str,
        name: &str,
        ingredients: &[(&str, i64)],
        tags: &[&str],
    ) -> String {
        let ingredients: Vec<Value> = ingredients
            .iter()
            .map(|(id, amount)| json!({ "id": id, "amount": amount }))
            .collect();

        let response = self
            .post(
                "/api/recipes/",
                Some(token),
                json!({
                    "ingredients": ingredients,
                    "tags": tags,
                    "image": IMAGE,
                    "name": name,
                    "text": format!("How to cook {name}"),
                    "cooking_time": 15,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);

        // created_at has second precision, ties fall back to the ulid
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;

        response.json()["id"].as_str().unwrap().to_owned()
    }
}
