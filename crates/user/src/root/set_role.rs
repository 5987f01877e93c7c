use foodgram_shared::user::Role;

use crate::repository;

impl super::Command {
    pub async fn set_role(&self, id: impl Into<String>, role: Role) -> foodgram_shared::Result<()> {
        let id = id.into();

        if !repository::exists(&self.read_db, &id).await? {
            foodgram_shared::not_found!("user");
        }

        repository::update(
            &self.write_db,
            repository::UpdateInput {
                id: id.to_owned(),
                password: None,
                role: Some(role),
            },
        )
        .await?;

        tracing::info!(user_id = %id, role = %role, "user role changed");

        Ok(())
    }
}
