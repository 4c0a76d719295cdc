/// Persistence layer for cats and votes
///
/// `CatStore` is the seam between handlers and storage. `PgCatStore` is the
/// production implementation. `InMemoryCatStore` backs local runs and tests.
pub mod cat_repo;
pub mod memory;

pub use cat_repo::PgCatStore;
pub use memory::InMemoryCatStore;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::models::{Cat, RankedCat};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Vote references a cat that is not registered
    #[error("Unknown cat: {0}")]
    UnknownCat(String),
}

impl StoreError {
    /// Short label for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::UnknownCat(_) => "unknown_cat",
            StoreError::Database(sqlx::Error::PoolTimedOut) => "pool_timeout",
            StoreError::Database(sqlx::Error::PoolClosed) => "pool_closed",
            StoreError::Database(_) => "database",
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CatStore: Send + Sync {
    /// Insert the cat unless a row with the same id exists.
    /// Returns `true` when a row was inserted.
    async fn upsert_cat(&self, cat_id: &str, name: &str, image_url: &str) -> StoreResult<bool>;

    /// Append one vote
    async fn insert_vote(&self, cat_id: &str, vote: i32) -> StoreResult<()>;

    /// Voted cats ordered by mean vote, highest first
    async fn top_cats(&self) -> StoreResult<Vec<RankedCat>>;

    /// Every registered cat, unordered
    async fn all_cats(&self) -> StoreResult<Vec<Cat>>;

    /// Cheap liveness check
    async fn ping(&self) -> StoreResult<()>;
}

/// Idempotent DDL for the two tables
pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS "Cats" (
        "CatID"    VARCHAR(255) PRIMARY KEY,
        "CatName"  VARCHAR(255) NOT NULL,
        "ImageURL" TEXT         NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS "Votes" (
        "CatID" VARCHAR(255) NOT NULL REFERENCES "Cats"("CatID"),
        "Vote"  INTEGER      NOT NULL CHECK ("Vote" BETWEEN 1 AND 5)
    )
    "#,
    r#"CREATE INDEX IF NOT EXISTS idx_votes_cat_id ON "Votes"("CatID")"#,
];

/// Create the `Cats` and `Votes` tables if they are missing
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    info!("Cats/Votes schema ensured");
    Ok(())
}
