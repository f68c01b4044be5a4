use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::{clamp_limit, get_history, list_history};
use crate::models::history::MatchHistoryRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/history?limit=
pub async fn handle_list_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<MatchHistoryRow>>, AppError> {
    let rows = list_history(&state.db, clamp_limit(query.limit)).await?;
    Ok(Json(rows))
}

/// GET /api/v1/history/:id
pub async fn handle_get_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchHistoryRow>, AppError> {
    get_history(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("match {id} not found")))
}
