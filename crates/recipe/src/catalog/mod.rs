//! Ingredient and tag reference data.

use std::ops::Deref;

mod create_ingredient;
mod create_tag;
mod import;

pub use create_ingredient::CreateIngredientInput;
pub use create_tag::CreateTagInput;
pub use import::ImportReport;

#[derive(Clone)]
pub struct Command(pub(crate) foodgram_shared::State);

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    pub fn new(state: foodgram_shared::State) -> Self {
        Self(state)
    }
}
