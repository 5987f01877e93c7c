use std::ops::Deref;

mod save;
mod unsave;

/// Favorite toggle over `(user, recipe)`.
#[derive(Clone)]
pub struct Command(pub(crate) foodgram_shared::State);

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
