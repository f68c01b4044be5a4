use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A structured job description saved for reuse across matches.
/// `record` holds a serialized `JobDescriptionRecord`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedJobDescriptionRow {
    pub id: Uuid,
    pub job_title: String,
    pub company: Option<String>,
    pub record: Value,
    pub created_at: DateTime<Utc>,
}
