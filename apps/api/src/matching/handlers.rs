//! Axum route handlers for the Matching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::record_match;
use crate::jd_library::get_job_description;
use crate::matching::{parse_job_description, parse_resume, parse_weightage, ScoreBlend, ScoreReport};
use crate::models::JobDescriptionRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    /// Inline structured JD. Exactly one of this and `job_description_id`.
    #[serde(default)]
    pub job_description: Option<Value>,
    /// Id of a JD saved in the library.
    #[serde(default)]
    pub job_description_id: Option<Uuid>,
    pub resume: Value,
    #[serde(default)]
    pub skills_weightage: Value,
    /// Overrides the configured blend for this call only.
    #[serde(default)]
    pub blend: Option<ScoreBlend>,
    #[serde(default = "default_persist")]
    pub persist: bool,
}

fn default_persist() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_id: Option<Uuid>,
    pub report: ScoreReport,
}

/// POST /api/v1/match
///
/// Scores one resume against one structured JD. A gate rejection is a normal
/// 200 response; unusable input shapes are 422.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let job = resolve_job_description(&state, &request).await?;
    let resume = parse_resume(&request.resume)?;
    let weightage = parse_weightage(&request.skills_weightage)?;
    let blend = request.blend.unwrap_or(state.engine.config().blend);

    let report = state
        .engine
        .calculate_ats_score_with_blend(&job, &resume, &weightage, blend)?;

    let history_id = if request.persist {
        Some(record_match(&state.db, &report).await?)
    } else {
        None
    };

    Ok(Json(MatchResponse { history_id, report }))
}

async fn resolve_job_description(
    state: &AppState,
    request: &MatchRequest,
) -> Result<JobDescriptionRecord, AppError> {
    match (&request.job_description, request.job_description_id) {
        (Some(inline), None) => Ok(parse_job_description(inline)?),
        (None, Some(id)) => get_job_description(&state.db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("job description {id} not found")))?
            .to_record(),
        (Some(_), Some(_)) => Err(AppError::Validation(
            "provide either job_description or job_description_id, not both".to_string(),
        )),
        (None, None) => Err(AppError::Validation(
            "job_description or job_description_id is required".to_string(),
        )),
    }
}
