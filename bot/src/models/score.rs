use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// One per-user cumulative score document in the `user_scores` collection.
/// Created on the first correct answer; only ever mutated by atomic `+4`
/// increments, so `score` stays a non-negative multiple of 4.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "authorID")]
    pub author_id: String,
    pub score: i64,
}
