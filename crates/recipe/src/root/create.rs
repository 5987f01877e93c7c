use ulid::Ulid;
use validator::Validate;

use crate::{IngredientAmount, association, repository};

#[derive(Validate)]
pub struct CreateInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub image: String,
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(range(min = 1, max = 32767))]
    pub cooking_time: i64,
    pub ingredients: Vec<IngredientAmount>,
    pub tags: Vec<String>,
}

impl super::Command {
    pub async fn create(
        &self,
        input: CreateInput,
        request_by: impl Into<String>,
    ) -> foodgram_shared::Result<String> {
        input.validate()?;

        let author_id = request_by.into();
        let id = Ulid::new().to_string();

        let mut tx = self.write_db.begin().await?;

        association::validate_ingredients(&mut tx, &input.ingredients).await?;
        association::validate_tags(&mut tx, &input.tags).await?;

        let image = self.images.store(&input.image).await?;

        let saved = async {
            repository::create(
                &mut tx,
                repository::CreateInput {
                    id: id.to_owned(),
                    author_id: author_id.to_owned(),
                    name: input.name,
                    image: image.to_owned(),
                    text: input.text,
                    cooking_time: input.cooking_time,
                },
            )
            .await?;

            association::replace_ingredients(&mut tx, &id, &input.ingredients).await?;
            association::replace_tags(&mut tx, &id, &input.tags).await?;

            tx.commit().await?;

            Ok::<_, foodgram_shared::Error>(())
        }
        .await;

        if let Err(err) = saved {
            self.discard_image(&image).await;
            return Err(err);
        }

        tracing::info!(recipe_id = %id, author_id = %author_id, "recipe created");

        Ok(id)
    }
}
