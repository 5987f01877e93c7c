use std::collections::HashSet;

use foodgram_db::table::{Subscription, User};
use foodgram_shared::Viewer;
use sea_query::{Expr, ExprTrait, Order, Query as SeaQuery, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Debug, Clone, FromRow)]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[sqlx(skip)]
    pub is_subscribed: bool,
}

fn select_users() -> SelectStatement {
    SeaQuery::select()
        .columns([
            (User::Table, User::Id),
            (User::Table, User::Email),
            (User::Table, User::Username),
            (User::Table, User::FirstName),
            (User::Table, User::LastName),
        ])
        .from(User::Table)
        .to_owned()
}

impl super::Query {
    pub async fn find_user(
        &self,
        id: impl Into<String>,
        viewer: &Viewer,
    ) -> foodgram_shared::Result<Option<UserView>> {
        let id = id.into();
        let statement = select_users()
            .and_where(Expr::col((User::Table, User::Id)).eq(id.as_str()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let Some(mut user) = sqlx::query_as_with::<_, UserView, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
        else {
            return Ok(None);
        };

        user.is_subscribed = self.is_subscribed(&id, viewer).await?;

        Ok(Some(user))
    }

    /// All users ordered by username.
    pub async fn list_users(&self, viewer: &Viewer) -> foodgram_shared::Result<Vec<UserView>> {
        let statement = select_users()
            .order_by((User::Table, User::Username), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let mut users = sqlx::query_as_with::<_, UserView, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let followed = followed_ids(&self.read_db, viewer).await?;
        for user in users.iter_mut() {
            user.is_subscribed = followed.contains(&user.id);
        }

        Ok(users)
    }

    /// Authors the viewer follows, ordered by username. Empty for anonymous viewers.
    pub async fn list_subscriptions(
        &self,
        viewer: &Viewer,
    ) -> foodgram_shared::Result<Vec<UserView>> {
        let Some(follower_id) = viewer.user_id() else {
            return Ok(vec![]);
        };

        let statement = select_users()
            .inner_join(
                Subscription::Table,
                Expr::col((Subscription::Table, Subscription::AuthorId))
                    .equals((User::Table, User::Id)),
            )
            .and_where(Expr::col((Subscription::Table, Subscription::FollowerId)).eq(follower_id))
            .order_by((User::Table, User::Username), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let mut users = sqlx::query_as_with::<_, UserView, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        for user in users.iter_mut() {
            user.is_subscribed = true;
        }

        Ok(users)
    }

    pub async fn is_subscribed(
        &self,
        author_id: &str,
        viewer: &Viewer,
    ) -> foodgram_shared::Result<bool> {
        let Some(follower_id) = viewer.user_id() else {
            return Ok(false);
        };

        let statement = SeaQuery::select()
            .column(Subscription::AuthorId)
            .from(Subscription::Table)
            .and_where(Expr::col(Subscription::FollowerId).eq(follower_id))
            .and_where(Expr::col(Subscription::AuthorId).eq(author_id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_with(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
            .is_some())
    }
}

async fn followed_ids(pool: &SqlitePool, viewer: &Viewer) -> foodgram_shared::Result<HashSet<String>> {
    let Some(follower_id) = viewer.user_id() else {
        return Ok(HashSet::new());
    };

    let statement = SeaQuery::select()
        .column(Subscription::AuthorId)
        .from(Subscription::Table)
        .and_where(Expr::col(Subscription::FollowerId).eq(follower_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let ids = sqlx::query_scalar_with::<_, String, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(ids.into_iter().collect())
}
