use crate::error::{BotError, BotResult};
use crate::models::ScoreRecord;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::Database;

const COLLECTION: &str = "user_scores";

/// The ledger contract the training workflow consumes. Point mutation must be
/// atomic per user: two sessions finishing near-simultaneously for the same
/// user must not lose an update.
#[async_trait]
pub trait ScoreLedger {
    /// Cumulative total for a user, 0 when no record exists.
    async fn get_score(&self, user_id: &str) -> BotResult<i64>;

    /// Adds `delta` points, creating the record with value `delta` on first
    /// award. Returns the acknowledged new total.
    async fn add_points(&self, user_id: &str, delta: i64) -> BotResult<i64>;
}

pub struct ScoreService {
    mongo: Database,
}

impl ScoreService {
    pub fn new(mongo: Database) -> Self {
        Self { mongo }
    }

    fn collection(&self) -> mongodb::Collection<ScoreRecord> {
        self.mongo.collection(COLLECTION)
    }

    /// Top scores in descending order. Mongo's sort is stable for equal keys,
    /// which is all the leaderboard promises for ties.
    pub async fn top_scores(&self, limit: i64) -> BotResult<Vec<ScoreRecord>> {
        let cursor = self
            .collection()
            .find(doc! {})
            .with_options(
                FindOptions::builder()
                    .sort(doc! { "score": -1 })
                    .limit(limit)
                    .build(),
            )
            .await
            .context("Failed to query score records")
            .map_err(BotError::Persistence)?;

        cursor
            .try_collect()
            .await
            .context("Failed to read score cursor")
            .map_err(BotError::Persistence)
    }

    pub async fn count_users(&self) -> BotResult<u64> {
        self.collection()
            .count_documents(doc! {})
            .await
            .context("Failed to count score records")
            .map_err(BotError::Persistence)
    }
}

#[async_trait]
impl ScoreLedger for ScoreService {
    async fn get_score(&self, user_id: &str) -> BotResult<i64> {
        let record = self
            .collection()
            .find_one(doc! { "authorID": user_id })
            .await
            .context("Failed to look up score record")
            .map_err(BotError::Persistence)?;

        Ok(record.map(|r| r.score).unwrap_or(0))
    }

    async fn add_points(&self, user_id: &str, delta: i64) -> BotResult<i64> {
        // Single-key atomic upsert: $inc on a missing document creates it
        // with `score == delta`, so first-award and increment are one op.
        let updated = self
            .collection()
            .find_one_and_update(
                doc! { "authorID": user_id },
                doc! { "$inc": { "score": delta } },
            )
            .with_options(
                FindOneAndUpdateOptions::builder()
                    .upsert(true)
                    .return_document(ReturnDocument::After)
                    .build(),
            )
            .await
            .context("Failed to increment score")
            .map_err(BotError::Persistence)?
            .ok_or_else(|| BotError::Persistence(anyhow!("score upsert returned no document")))?;

        tracing::info!(user = %user_id, total = updated.score, "Score updated");
        Ok(updated.score)
    }
}
