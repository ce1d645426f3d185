//! PostgreSQL persistence for FieldSync: schema bootstrap, row models, and
//! the repository functions the scheduling engine reads and writes through.

pub mod models;
pub mod repositories;
pub mod schema;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}
