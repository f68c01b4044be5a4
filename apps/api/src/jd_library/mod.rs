//! JD library: structured job descriptions saved once and matched against
//! many resumes by id.

pub mod handlers;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::parse_job_description;
use crate::models::jd_library::SavedJobDescriptionRow;
use crate::models::JobDescriptionRecord;

impl SavedJobDescriptionRow {
    /// Re-reads the stored record through the same lenient parser as inline JDs.
    pub fn to_record(&self) -> Result<JobDescriptionRecord, AppError> {
        Ok(parse_job_description(&self.record)?)
    }
}

pub async fn save_job_description(
    pool: &PgPool,
    record: &JobDescriptionRecord,
) -> Result<SavedJobDescriptionRow, AppError> {
    if record.job_title.trim().is_empty() {
        return Err(AppError::Validation("job_title cannot be empty".to_string()));
    }
    let payload = serde_json::to_value(record)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("serialize job description: {e}")))?;

    let row = sqlx::query_as::<_, SavedJobDescriptionRow>(
        r#"
        INSERT INTO job_descriptions (id, job_title, company, record)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&record.job_title)
    .bind(record.company.as_deref())
    .bind(&payload)
    .fetch_one(pool)
    .await?;

    info!(jd_id = %row.id, job_title = %row.job_title, "Saved job description");
    Ok(row)
}

/// Most recently saved first.
pub async fn list_job_descriptions(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<SavedJobDescriptionRow>, AppError> {
    Ok(sqlx::query_as::<_, SavedJobDescriptionRow>(
        "SELECT * FROM job_descriptions ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?)
}

pub async fn get_job_description(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<SavedJobDescriptionRow>, AppError> {
    Ok(
        sqlx::query_as::<_, SavedJobDescriptionRow>("SELECT * FROM job_descriptions WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn row(record: serde_json::Value) -> SavedJobDescriptionRow {
        SavedJobDescriptionRow {
            id: Uuid::new_v4(),
            job_title: "Python Developer".to_string(),
            company: None,
            record,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_saved_record_round_trips_through_parser() {
        let mut record = JobDescriptionRecord::new("Python Developer");
        record.key_responsibilities = vec!["Develop Python applications".to_string()];
        let saved = row(serde_json::to_value(&record).unwrap());
        assert_eq!(saved.to_record().unwrap(), record);
    }

    #[test]
    fn test_corrupt_saved_record_is_could_not_evaluate() {
        let saved = row(json!({"description": "no title"}));
        assert!(matches!(saved.to_record(), Err(AppError::CouldNotEvaluate(_))));
    }
}
