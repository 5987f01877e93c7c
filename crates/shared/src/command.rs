use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] ValidationErrors),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Missing(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("authentication credentials were not provided")]
    Unauthorized,

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(value: argon2::password_hash::Error) -> Self {
        Self::Unknown(anyhow::anyhow!(value.to_string()))
    }
}

impl Error {
    /// Single field-scoped validation failure.
    pub fn field(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        let mut error = ValidationError::new(code);
        error.message = Some(Cow::Owned(message.into()));

        let mut errors = ValidationErrors::new();
        errors.add(field, error);

        Self::Validate(errors)
    }
}

/// True when the database rejected a write because of a UNIQUE or PRIMARY KEY
/// constraint.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(e) if e.is_unique_violation())
}

/// Name of the constraint column reported by SQLite, `user.email` for
/// "UNIQUE constraint failed: user.email".
pub fn violated_column(err: &sqlx::Error) -> Option<String> {
    let sqlx::Error::Database(e) = err else {
        return None;
    };

    e.message()
        .rsplit_once(": ")
        .map(|(_, columns)| columns.to_owned())
}

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Server(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Server(format!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Server(format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! not_found {
    ($what:literal $(,)?) => {
        return Err($crate::Error::NotFound($what.to_owned()))
    };
}

#[macro_export]
macro_rules! forbidden {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Forbidden($msg.to_owned()))
    };
}

#[macro_export]
macro_rules! invalid {
    ($field:literal, $code:literal, $msg:literal $(,)?) => {
        return Err($crate::Error::field($field, $code, $msg))
    };
    ($field:literal, $code:literal, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::field($field, $code, format!($fmt, $($arg)*)))
    };
}
