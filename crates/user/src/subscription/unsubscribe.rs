use foodgram_db::table::Subscription;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository;

impl super::Command {
    pub async fn unsubscribe(
        &self,
        follower_id: impl Into<String>,
        author_id: impl Into<String>,
    ) -> foodgram_shared::Result<()> {
        let follower_id = follower_id.into();
        let author_id = author_id.into();

        if follower_id == author_id {
            foodgram_shared::invalid!("author", "self", "You cannot unsubscribe from yourself.");
        }

        if !repository::exists(&self.read_db, &author_id).await? {
            foodgram_shared::not_found!("author");
        }

        let statement = Query::delete()
            .from_table(Subscription::Table)
            .and_where(Expr::col(Subscription::FollowerId).eq(follower_id.as_str()))
            .and_where(Expr::col(Subscription::AuthorId).eq(author_id.as_str()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(foodgram_shared::Error::Missing(
                "You are not subscribed to this author.".to_owned(),
            ));
        }

        tracing::info!(follower_id = %follower_id, author_id = %author_id, "unsubscribed");

        Ok(())
    }
}
