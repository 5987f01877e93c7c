use foodgram_db::table::Tag;
use regex::Regex;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use std::sync::LazyLock;
use ulid::Ulid;
use validator::Validate;

static RE_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color regex"));

static RE_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid slug regex"));

#[derive(Validate)]
pub struct CreateTagInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(regex(path = *RE_COLOR, message = "Color must be a hex value like #49B64E."))]
    pub color: String,
    #[validate(length(min = 1, max = 200), regex(path = *RE_SLUG))]
    pub slug: String,
}

impl super::Command {
    pub async fn create_tag(&self, input: CreateTagInput) -> foodgram_shared::Result<String> {
        input.validate()?;

        let id = Ulid::new().to_string();
        let statement = Query::insert()
            .into_table(Tag::Table)
            .columns([Tag::Id, Tag::Name, Tag::Color, Tag::Slug])
            .values_panic([
                id.to_owned().into(),
                input.name.into(),
                input.color.into(),
                input.slug.to_owned().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(_) => {}
            Err(err) if foodgram_shared::is_unique_violation(&err) => {
                foodgram_shared::invalid!("slug", "unique", "Tag with slug {} already exists.", input.slug);
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(tag_id = %id, slug = %input.slug, "tag created");

        Ok(id)
    }
}
