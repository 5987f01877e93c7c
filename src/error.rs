use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] foodgram_shared::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn not_found(what: &str) -> Self {
        Self::Domain(foodgram_shared::Error::NotFound(what.to_owned()))
    }

    pub fn unauthorized() -> Self {
        Self::Domain(foodgram_shared::Error::Unauthorized)
    }
}

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Scope a body rejection to the top-level field serde stopped at, or to
/// `non_field_errors` when the body is not a JSON object of the right shape.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let text = rejection.body_text();
        let scoped = match &rejection {
            JsonRejection::JsonDataError(_) => text
                .strip_prefix(DATA_ERROR_PREFIX)
                .and_then(|rest| rest.split_once(": "))
                .and_then(|(path, message)| {
                    let field = path.split(['.', '[']).next().filter(|f| !f.is_empty())?;
                    Some((field.to_owned(), message.to_owned()))
                }),
            _ => None,
        };

        let (field, message) = scoped.unwrap_or_else(|| ("non_field_errors".to_owned(), text));
        let mut error = ValidationError::new("invalid");
        error.message = Some(message.into());

        let mut errors = ValidationErrors::new();
        errors
            .errors_mut()
            .insert(field.into(), ValidationErrorsKind::Field(vec![error]));

        Self::Domain(foodgram_shared::Error::Validate(errors))
    }
}

fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match &*error.code {
        "length" => "Ensure this field has a valid length.".to_owned(),
        "range" => match (error.params.get("min"), error.params.get("max")) {
            (Some(min), Some(max)) => format!("Ensure this value is between {min} and {max}."),
            (Some(min), None) => format!("Ensure this value is greater than or equal to {min}."),
            _ => "Value out of range.".to_owned(),
        },
        "email" => "Enter a valid email address.".to_owned(),
        "regex" => "Enter a valid value.".to_owned(),
        _ => "Invalid value.".to_owned(),
    }
}

/// `{field: [messages]}` with fields in a stable order.
fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| (field.to_string(), errors.iter().map(describe).collect()))
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        use foodgram_shared::Error;

        match self {
            AppError::Domain(Error::Validate(errors)) => {
                (StatusCode::BAD_REQUEST, Json(field_messages(&errors))).into_response()
            }
            AppError::Domain(Error::NotFound(what)) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": format!("{what} not found") })),
            )
                .into_response(),
            AppError::Domain(Error::Conflict(msg) | Error::Missing(msg)) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": msg }))).into_response()
            }
            AppError::Domain(Error::Forbidden(msg)) => {
                (StatusCode::FORBIDDEN, Json(json!({ "detail": msg }))).into_response()
            }
            AppError::Domain(Error::Unauthorized) => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": "Authentication credentials were not provided." })),
            )
                .into_response(),
            AppError::Domain(Error::Server(msg)) => {
                tracing::error!(error = %msg, "server error");
                internal_error()
            }
            AppError::Domain(Error::Unknown(err)) | AppError::Internal(err) => {
                tracing::error!(error = ?err, "unexpected error");
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "Internal server error" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodgram_shared::Error;

    async fn body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_is_field_scoped() {
        let response =
            AppError::from(Error::field("tags", "empty", "Add at least one tag.")).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(response).await, json!({ "tags": ["Add at least one tag."] }));
    }

    #[tokio::test]
    async fn test_conflict_and_missing_are_bad_request() {
        let conflict = AppError::from(Error::Conflict("already".to_owned())).into_response();
        assert_eq!(conflict.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(conflict).await, json!({ "errors": "already" }));

        let missing = AppError::from(Error::Missing("absent".to_owned())).into_response();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_status_codes() {
        assert_eq!(
            AppError::not_found("recipe").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(Error::Forbidden("no".to_owned()))
                .into_response()
                .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::unauthorized().into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(anyhow::anyhow!("boom")).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
