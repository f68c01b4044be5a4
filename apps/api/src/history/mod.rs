//! Match history: an append-only log of scored reports.

pub mod handlers;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::{ScoreReport, Verdict};
use crate::models::history::MatchHistoryRow;

pub const DEFAULT_HISTORY_LIMIT: i64 = 20;
pub const MAX_HISTORY_LIMIT: i64 = 100;

/// Clamps a caller-supplied page size to 1..=100, defaulting to 20.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Rejected => "rejected",
        Verdict::Evaluated => "evaluated",
    }
}

/// Stores a report and returns its history id.
pub async fn record_match(pool: &PgPool, report: &ScoreReport) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    let payload = serde_json::to_value(report)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("serialize score report: {e}")))?;

    sqlx::query(
        r#"
        INSERT INTO match_history
            (id, candidate_name, job_title, overall_score, verdict, rejection_reason, report)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(&report.candidate_name)
    .bind(&report.job_title)
    .bind(report.overall_score)
    .bind(verdict_label(report.verdict))
    .bind(report.detailed_analysis.rejection_reason.as_deref())
    .bind(&payload)
    .execute(pool)
    .await?;

    info!(
        history_id = %id,
        overall_score = report.overall_score,
        verdict = verdict_label(report.verdict),
        "Recorded match"
    );
    Ok(id)
}

/// Most recent matches first.
pub async fn list_history(pool: &PgPool, limit: i64) -> Result<Vec<MatchHistoryRow>, AppError> {
    Ok(sqlx::query_as::<_, MatchHistoryRow>(
        "SELECT * FROM match_history ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?)
}

pub async fn get_history(pool: &PgPool, id: Uuid) -> Result<Option<MatchHistoryRow>, AppError> {
    Ok(
        sqlx::query_as::<_, MatchHistoryRow>("SELECT * FROM match_history WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), 20);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-5)), 1);
        assert_eq!(clamp_limit(Some(50)), 50);
        assert_eq!(clamp_limit(Some(1000)), 100);
    }

    #[test]
    fn test_verdict_label_matches_serialized_form() {
        for verdict in [Verdict::Rejected, Verdict::Evaluated] {
            let serialized = serde_json::to_value(verdict).unwrap();
            assert_eq!(serialized, verdict_label(verdict));
        }
    }
}
