use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::{CatStore, StoreError, StoreResult};
use crate::models::{Cat, RankedCat};

#[derive(Default)]
struct Tables {
    cats: Vec<Cat>,
    by_id: HashMap<String, usize>,
    votes: Vec<(String, i32)>,
}

/// Process-local `CatStore`
///
/// Same semantics as the Postgres store: insert-if-absent for cats, a
/// foreign-key check on votes, inner-join averages. Each call holds the
/// lock for a single operation, so every write is atomic.
#[derive(Default)]
pub struct InMemoryCatStore {
    tables: RwLock<Tables>,
}

impl InMemoryCatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cat_count(&self) -> usize {
        self.tables.read().cats.len()
    }

    pub fn vote_count(&self) -> usize {
        self.tables.read().votes.len()
    }

    /// Votes recorded for one cat, in insertion order
    pub fn votes_for(&self, cat_id: &str) -> Vec<i32> {
        self.tables
            .read()
            .votes
            .iter()
            .filter(|(id, _)| id == cat_id)
            .map(|(_, vote)| *vote)
            .collect()
    }
}

#[async_trait]
impl CatStore for InMemoryCatStore {
    async fn upsert_cat(&self, cat_id: &str, name: &str, image_url: &str) -> StoreResult<bool> {
        let mut tables = self.tables.write();
        if tables.by_id.contains_key(cat_id) {
            return Ok(false);
        }

        let idx = tables.cats.len();
        tables.cats.push(Cat {
            cat_id: cat_id.to_string(),
            name: name.to_string(),
            image_url: image_url.to_string(),
        });
        tables.by_id.insert(cat_id.to_string(), idx);
        Ok(true)
    }

    async fn insert_vote(&self, cat_id: &str, vote: i32) -> StoreResult<()> {
        let mut tables = self.tables.write();
        if !tables.by_id.contains_key(cat_id) {
            return Err(StoreError::UnknownCat(cat_id.to_string()));
        }
        tables.votes.push((cat_id.to_string(), vote));
        Ok(())
    }

    async fn top_cats(&self) -> StoreResult<Vec<RankedCat>> {
        let tables = self.tables.read();

        let mut totals: HashMap<&str, (i64, i64)> = HashMap::new();
        for (cat_id, vote) in &tables.votes {
            let entry = totals.entry(cat_id.as_str()).or_insert((0, 0));
            entry.0 += i64::from(*vote);
            entry.1 += 1;
        }

        let mut ranked: Vec<RankedCat> = tables
            .cats
            .iter()
            .filter_map(|cat| {
                totals.get(cat.cat_id.as_str()).map(|(sum, count)| RankedCat {
                    cat_id: cat.cat_id.clone(),
                    name: cat.name.clone(),
                    image_url: cat.image_url.clone(),
                    average_vote: *sum as f64 / *count as f64,
                })
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.average_vote
                .total_cmp(&a.average_vote)
                .then_with(|| a.cat_id.cmp(&b.cat_id))
        });
        Ok(ranked)
    }

    async fn all_cats(&self) -> StoreResult<Vec<Cat>> {
        Ok(self.tables.read().cats.clone())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
