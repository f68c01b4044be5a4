use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchHistoryRow {
    pub id: Uuid,
    pub candidate_name: String,
    pub job_title: String,
    pub overall_score: f64,
    pub verdict: String,
    pub rejection_reason: Option<String>,
    pub report: Value,
    pub created_at: DateTime<Utc>,
}
