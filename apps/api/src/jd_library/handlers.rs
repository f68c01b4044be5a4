use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::clamp_limit;
use crate::jd_library::{get_job_description, list_job_descriptions, save_job_description};
use crate::matching::parse_job_description;
use crate::models::jd_library::SavedJobDescriptionRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveJdRequest {
    pub job_description: Value,
}

#[derive(Debug, Deserialize)]
pub struct LibraryQuery {
    pub limit: Option<i64>,
}

/// POST /api/v1/jd-library
///
/// Stores a structured JD (e.g. the output of /jd/structure or /jd/refine).
pub async fn handle_save_jd(
    State(state): State<AppState>,
    Json(request): Json<SaveJdRequest>,
) -> Result<(StatusCode, Json<SavedJobDescriptionRow>), AppError> {
    let record = parse_job_description(&request.job_description)?;
    let row = save_job_description(&state.db, &record).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/jd-library?limit=
pub async fn handle_list_jds(
    State(state): State<AppState>,
    Query(query): Query<LibraryQuery>,
) -> Result<Json<Vec<SavedJobDescriptionRow>>, AppError> {
    let rows = list_job_descriptions(&state.db, clamp_limit(query.limit)).await?;
    Ok(Json(rows))
}

/// GET /api/v1/jd-library/:id
pub async fn handle_get_jd(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SavedJobDescriptionRow>, AppError> {
    get_job_description(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("job description {id} not found")))
}
