use validator::Validate;

use crate::{IngredientAmount, association, repository};

/// Partial update. Scalar fields are kept when absent; both association sets
/// are always replaced.
#[derive(Validate, Default)]
pub struct UpdateInput {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub image: Option<String>,
    #[validate(length(min = 1))]
    pub text: Option<String>,
    #[validate(range(min = 1, max = 32767))]
    pub cooking_time: Option<i64>,
    pub ingredients: Vec<IngredientAmount>,
    pub tags: Vec<String>,
}

impl super::Command {
    pub async fn update(
        &self,
        id: impl Into<String>,
        input: UpdateInput,
        request_by: impl Into<String>,
    ) -> foodgram_shared::Result<()> {
        let Some(recipe) = self.load(id).await? else {
            foodgram_shared::not_found!("recipe");
        };

        let request_by: String = request_by.into();
        if recipe.author_id != request_by {
            foodgram_shared::forbidden!("not author of recipe");
        }

        input.validate()?;

        let mut tx = self.write_db.begin().await?;

        association::validate_ingredients(&mut tx, &input.ingredients).await?;
        association::validate_tags(&mut tx, &input.tags).await?;

        let image = match input.image {
            Some(image) => Some(self.images.store(&image).await?),
            None => None,
        };

        let saved = async {
            repository::update(
                &mut tx,
                repository::UpdateInput {
                    id: recipe.id.to_owned(),
                    name: input.name,
                    image: image.to_owned(),
                    text: input.text,
                    cooking_time: input.cooking_time,
                },
            )
            .await?;

            association::replace_ingredients(&mut tx, &recipe.id, &input.ingredients).await?;
            association::replace_tags(&mut tx, &recipe.id, &input.tags).await?;

            tx.commit().await?;

            Ok::<_, foodgram_shared::Error>(())
        }
        .await;

        if let Err(err) = saved {
            if let Some(image) = &image {
                self.discard_image(image).await;
            }
            return Err(err);
        }

        tracing::info!(recipe_id = %recipe.id, "recipe updated");

        Ok(())
    }
}
