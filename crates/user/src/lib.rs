pub mod jwt;
pub mod subscription;

mod query;
pub(crate) mod repository;
mod root;

pub use jwt::{Claims, generate_jwt, validate_jwt};
pub use query::*;
pub use root::*;
