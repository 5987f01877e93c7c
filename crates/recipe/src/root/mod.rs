use std::{ops::Deref, sync::Arc};

use crate::{ImageStore, repository};

mod create;
mod delete;
mod update;

pub use create::CreateInput;
pub use update::UpdateInput;

#[derive(Clone)]
pub struct Command {
    state: foodgram_shared::State,
    images: Arc<dyn ImageStore>,
    pub favorite: crate::favorite::Command,
    pub catalog: crate::catalog::Command,
}

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: foodgram_shared::State, images: Arc<dyn ImageStore>) -> Self {
        Self {
            favorite: crate::favorite::Command(state.clone()),
            catalog: crate::catalog::Command(state.clone()),
            images,
            state,
        }
    }

    pub async fn load(&self, id: impl Into<String>) -> foodgram_shared::Result<Option<Recipe>> {
        let id = id.into();
        let recipe = repository::find(&self.read_db, &id).await?;

        Ok(recipe.map(|row| Recipe {
            id: row.id,
            author_id: row.author_id,
        }))
    }

    /// Drop an image stored for a write that did not commit. Files are shared
    /// by content, so one still referenced by a recipe stays.
    async fn discard_image(&self, image: &str) {
        let result = match repository::image_in_use(&self.write_db, image).await {
            Ok(true) => Ok(()),
            Ok(false) => self.images.remove(image).await,
            Err(err) => Err(err),
        };

        if let Err(err) = result {
            tracing::warn!(image = %image, error = %err, "failed to discard image");
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub author_id: String,
}
