use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body. Malformed or mistyped payloads reject with a 400
/// validation error instead of axum's plain-text 4xx.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
