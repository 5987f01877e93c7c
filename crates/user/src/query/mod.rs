use std::ops::Deref;

mod user;

pub use user::*;

#[derive(Clone)]
pub struct Query(pub foodgram_shared::State);

impl Deref for Query {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
