use crate::repository;

impl super::Command {
    /// Author or admin only. Links, favorites and cart rows go with the recipe.
    pub async fn delete(
        &self,
        id: impl Into<String>,
        request_by: impl Into<String>,
    ) -> foodgram_shared::Result<()> {
        let Some(recipe) = self.load(id).await? else {
            foodgram_shared::not_found!("recipe");
        };

        let request_by = request_by.into();
        if recipe.author_id != request_by && !repository::is_admin(&self.read_db, &request_by).await? {
            foodgram_shared::forbidden!("not author of recipe");
        }

        if repository::delete(&self.write_db, &recipe.id).await? == 0 {
            foodgram_shared::not_found!("recipe");
        }

        tracing::info!(recipe_id = %recipe.id, request_by = %request_by, "recipe deleted");

        Ok(())
    }
}
