use crate::repository;

impl super::Command {
    /// Revoke every token issued to the user so far.
    pub async fn logout(&self, id: impl Into<String>) -> foodgram_shared::Result<()> {
        let id = id.into();

        if repository::bump_token_version(&self.write_db, &id).await? == 0 {
            foodgram_shared::not_found!("user");
        }

        tracing::info!(user_id = %id, "tokens revoked");

        Ok(())
    }
}
