use async_trait::async_trait;
use sqlx::{Connection, PgPool};
use std::time::Instant;
use tracing::{debug, warn};

use super::{CatStore, StoreError, StoreResult};
use crate::metrics::{CAT_STORE_ERRORS_TOTAL, CAT_STORE_OPERATION_DURATION_SECONDS};
use crate::models::{Cat, RankedCat};

/// Postgres `foreign_key_violation`
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Store calls, as labelled in metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    UpsertCat,
    InsertVote,
    TopCats,
    AllCats,
    Ping,
}

impl StoreOp {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreOp::UpsertCat => "upsert_cat",
            StoreOp::InsertVote => "insert_vote",
            StoreOp::TopCats => "top_cats",
            StoreOp::AllCats => "all_cats",
            StoreOp::Ping => "ping",
        }
    }
}

/// Record duration and, on failure, the error kind of one store call
pub(crate) fn record_operation<T>(op: StoreOp, started: Instant, result: &StoreResult<T>) {
    let outcome = if result.is_ok() { "ok" } else { "error" };
    CAT_STORE_OPERATION_DURATION_SECONDS
        .with_label_values(&[op.as_str(), outcome])
        .observe(started.elapsed().as_secs_f64());

    if let Err(err) = result {
        CAT_STORE_ERRORS_TOTAL
            .with_label_values(&[op.as_str(), err.kind()])
            .inc();
        warn!(operation = op.as_str(), kind = err.kind(), error = %err, "Store operation failed");
    }
}

/// `CatStore` over a Postgres pool
///
/// Every call takes its own pooled connection. Writes run inside a
/// transaction that is committed on success; on any early return the
/// transaction is rolled back and the connection released when dropped.
#[derive(Clone)]
pub struct PgCatStore {
    pool: PgPool,
}

impl PgCatStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert_cat_if_absent(
        &self,
        cat_id: &str,
        name: &str,
        image_url: &str,
    ) -> StoreResult<bool> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = Connection::begin(&mut *conn).await?;

        // Single statement: concurrent registrations of the same id are
        // settled by the primary key.
        let result = sqlx::query(
            r#"
            INSERT INTO "Cats" ("CatID", "CatName", "ImageURL")
            VALUES ($1, $2, $3)
            ON CONFLICT ("CatID") DO NOTHING
            "#,
        )
        .bind(cat_id)
        .bind(name)
        .bind(image_url)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let inserted = result.rows_affected() == 1;
        debug!(cat_id = %cat_id, inserted, "Upserted cat");
        Ok(inserted)
    }

    async fn append_vote(&self, cat_id: &str, vote: i32) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = Connection::begin(&mut *conn).await?;

        sqlx::query(r#"INSERT INTO "Votes" ("CatID", "Vote") VALUES ($1, $2)"#)
            .bind(cat_id)
            .bind(vote)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_vote_error(e, cat_id))?;

        tx.commit().await?;
        Ok(())
    }

    async fn ranked_cats(&self) -> StoreResult<Vec<RankedCat>> {
        let mut conn = self.pool.acquire().await?;

        let cats = sqlx::query_as::<_, RankedCat>(
            r#"
            SELECT c."CatID", c."CatName", c."ImageURL",
                   AVG(v."Vote")::FLOAT8 AS "AverageVote"
            FROM "Cats" c
            JOIN "Votes" v ON c."CatID" = v."CatID"
            GROUP BY c."CatID", c."CatName", c."ImageURL"
            ORDER BY "AverageVote" DESC, c."CatID" ASC
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(cats)
    }

    async fn every_cat(&self) -> StoreResult<Vec<Cat>> {
        let mut conn = self.pool.acquire().await?;

        let cats = sqlx::query_as::<_, Cat>(r#"SELECT "CatID", "CatName", "ImageURL" FROM "Cats""#)
            .fetch_all(&mut *conn)
            .await?;

        Ok(cats)
    }
}

fn map_vote_error(err: sqlx::Error, cat_id: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
            return StoreError::UnknownCat(cat_id.to_string());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl CatStore for PgCatStore {
    async fn upsert_cat(&self, cat_id: &str, name: &str, image_url: &str) -> StoreResult<bool> {
        let started = Instant::now();
        let result = self.insert_cat_if_absent(cat_id, name, image_url).await;
        record_operation(StoreOp::UpsertCat, started, &result);
        result
    }

    async fn insert_vote(&self, cat_id: &str, vote: i32) -> StoreResult<()> {
        let started = Instant::now();
        let result = self.append_vote(cat_id, vote).await;
        record_operation(StoreOp::InsertVote, started, &result);
        result
    }

    async fn top_cats(&self) -> StoreResult<Vec<RankedCat>> {
        let started = Instant::now();
        let result = self.ranked_cats().await;
        record_operation(StoreOp::TopCats, started, &result);
        result
    }

    async fn all_cats(&self) -> StoreResult<Vec<Cat>> {
        let started = Instant::now();
        let result = self.every_cat().await;
        record_operation(StoreOp::AllCats, started, &result);
        result
    }

    async fn ping(&self) -> StoreResult<()> {
        let started = Instant::now();
        let result = sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(StoreError::from);
        record_operation(StoreOp::Ping, started, &result);
        result
    }
}
