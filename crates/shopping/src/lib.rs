mod aggregation;
mod query;
pub(crate) mod repository;
mod root;

pub use aggregation::{ShoppingListItem, render};
pub use query::*;
pub use root::*;
