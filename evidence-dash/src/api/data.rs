//! JSON endpoints over tags and detection records
//!
//! The tag endpoint and the combined endpoint deliberately disagree on a
//! missing tag file: `/api/tags` answers 404, `/api/all-data` answers an
//! empty list.

use axum::{
    extract::{Path, State},
    Json,
};
use evidence_common::{DetectionRecord, MergedTag, Tag};
use serde::Serialize;
use tracing::debug;

use super::ApiError;
use crate::AppState;

/// Summary text response
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// GET /api/tags
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, ApiError> {
    let tags = state.store.list_tags().await?;
    Ok(Json(tags))
}

/// GET /api/detections/:tag_id
pub async fn get_detection(
    State(state): State<AppState>,
    Path(tag_id): Path<String>,
) -> Result<Json<DetectionRecord>, ApiError> {
    let record = state.store.get_detection(&tag_id).await?;
    Ok(Json(record))
}

/// GET /api/summary/:tag_id
pub async fn get_summary(
    State(state): State<AppState>,
    Path(tag_id): Path<String>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let summary = state.store.get_summary(&tag_id).await?;
    Ok(Json(SummaryResponse { summary }))
}

/// GET /api/detections
///
/// Malformed detection files are left out; only a failure to list the
/// directory is an error.
pub async fn list_detections(
    State(state): State<AppState>,
) -> Result<Json<Vec<DetectionRecord>>, ApiError> {
    let records = state.store.list_all_detections().await?;
    Ok(Json(records))
}

/// GET /api/all-data
///
/// Every tag with `detection` set to its record or `null`.
pub async fn get_all_data(State(state): State<AppState>) -> Result<Json<Vec<MergedTag>>, ApiError> {
    let merged = state.store.get_all_data().await?;
    debug!("Serving combined data for {} tags", merged.len());
    Ok(Json(merged))
}
