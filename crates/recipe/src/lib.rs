mod association;
pub mod catalog;
pub mod favorite;
pub mod image;
mod query;
pub(crate) mod repository;
mod root;

pub use association::IngredientAmount;
pub use image::{FsImageStore, ImageStore};
pub use query::*;
pub use root::*;
