//! Axum route handlers for the Extraction API.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::{JobDescriptionRecord, ResumeRecord};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StructureJdRequest {
    pub jd_text: String,
}

#[derive(Debug, Deserialize)]
pub struct RefineJdRequest {
    pub current_structure: Value,
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtractResumeRequest {
    pub resume_text: String,
}

fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// POST /api/v1/jd/structure
pub async fn handle_structure_jd(
    State(state): State<AppState>,
    Json(request): Json<StructureJdRequest>,
) -> Result<Json<JobDescriptionRecord>, AppError> {
    require_text(&request.jd_text, "jd_text")?;
    let record = state
        .extractor
        .structure_job_description(&request.jd_text)
        .await?;
    Ok(Json(record))
}

/// POST /api/v1/jd/refine
///
/// Re-runs structuring with user feedback applied to the current structure.
pub async fn handle_refine_jd(
    State(state): State<AppState>,
    Json(request): Json<RefineJdRequest>,
) -> Result<Json<JobDescriptionRecord>, AppError> {
    require_text(&request.feedback, "feedback")?;
    let record = state
        .extractor
        .refine_job_description(&request.current_structure, &request.feedback)
        .await?;
    Ok(Json(record))
}

/// POST /api/v1/resumes/extract
pub async fn handle_extract_resume(
    State(state): State<AppState>,
    Json(request): Json<ExtractResumeRequest>,
) -> Result<Json<ResumeRecord>, AppError> {
    require_text(&request.resume_text, "resume_text")?;
    let record = state.extractor.extract_resume(&request.resume_text).await?;
    Ok(Json(record))
}
