use sqlx_migrator::{Info, Migrator};

mod m0_1;
pub mod table;

/// Upper bound for ingredient amounts and cooking times, a signed 16-bit max.
pub const MAX_AMOUNT: i64 = 32_767;

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0_1::Migration)])?;

    Ok(migrator)
}
