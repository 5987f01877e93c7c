use foodgram_db::table::Subscription;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository;

impl super::Command {
    pub async fn subscribe(
        &self,
        follower_id: impl Into<String>,
        author_id: impl Into<String>,
    ) -> foodgram_shared::Result<()> {
        let follower_id = follower_id.into();
        let author_id = author_id.into();

        if follower_id == author_id {
            foodgram_shared::invalid!("author", "self", "You cannot subscribe to yourself.");
        }

        if !repository::exists(&self.read_db, &author_id).await? {
            foodgram_shared::not_found!("author");
        }

        let statement = Query::insert()
            .into_table(Subscription::Table)
            .columns([
                Subscription::FollowerId,
                Subscription::AuthorId,
                Subscription::CreatedAt,
            ])
            .values_panic([
                follower_id.to_owned().into(),
                author_id.to_owned().into(),
                foodgram_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(_) => {}
            Err(err) if foodgram_shared::is_unique_violation(&err) => {
                return Err(foodgram_shared::Error::Conflict(
                    "You are already subscribed to this author.".to_owned(),
                ));
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(follower_id = %follower_id, author_id = %author_id, "subscribed");

        Ok(())
    }
}
