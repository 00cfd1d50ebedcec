use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A generated practice round in the `generated_rounds` collection.
/// Immutable once created; read back by id, listed per requester, counted
/// for hit statistics. Never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedRound {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "htmlContent")]
    pub html_content: String,
    #[serde(rename = "requestedBy")]
    pub requested_by: String,
    #[serde(rename = "authorTag")]
    pub author_tag: String,
    /// RFC 3339 order matches chronological order, so the recency sort can
    /// stay a plain descending index on this field.
    #[serde(rename = "timestamp")]
    pub requested_at: DateTime<Utc>,
}
