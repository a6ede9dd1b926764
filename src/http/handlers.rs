//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! services layer for the actual computation.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    DatasetListResponse, FilterQuery, HealthResponse, RecordsResponse, UploadDatasetRequest,
    UploadDatasetResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{AlignedTimeSeries, HeatmapData, OccupancyRecord, RoomSummaryData};
use crate::services;
use crate::store::Dataset;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Health check endpoint to verify the service is running.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        datasets: state.store.len(),
    }))
}

/// POST /v1/datasets
///
/// Upload a CSV dataset. Returns 201 for new content, 200 when the upload
/// matched an existing dataset by checksum.
pub async fn upload_dataset(
    State(state): State<AppState>,
    Json(request): Json<UploadDatasetRequest>,
) -> Result<(StatusCode, Json<UploadDatasetResponse>), AppError> {
    let outcome = state.store.insert(&request.name, &request.csv)?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(UploadDatasetResponse {
            dataset_id: outcome.dataset.id,
            checksum: outcome.dataset.checksum.clone(),
            record_count: outcome.dataset.records.len(),
            created: outcome.created,
            issues: outcome.dataset.issues.clone(),
        }),
    ))
}

/// GET /v1/datasets
///
/// List all stored datasets.
pub async fn list_datasets(State(state): State<AppState>) -> HandlerResult<DatasetListResponse> {
    let datasets = state.store.list();
    let total = datasets.len();
    Ok(Json(DatasetListResponse { datasets, total }))
}

/// GET /v1/datasets/{dataset_id}/records
///
/// Filtered records for the data-table view.
pub async fn get_records(
    State(state): State<AppState>,
    Path(dataset_id): Path<i64>,
    Query(query): Query<FilterQuery>,
) -> HandlerResult<RecordsResponse> {
    let (_, records) = filtered_records(&state, dataset_id, query)?;
    let total = records.len();
    Ok(Json(RecordsResponse { records, total }))
}

/// GET /v1/datasets/{dataset_id}/rooms
///
/// Per-room summary statistics for the map and KPI panel.
pub async fn get_room_summaries(
    State(state): State<AppState>,
    Path(dataset_id): Path<i64>,
    Query(query): Query<FilterQuery>,
) -> HandlerResult<RoomSummaryData> {
    let (_, records) = filtered_records(&state, dataset_id, query)?;
    Ok(Json(services::compute_room_summaries(&records)))
}

/// GET /v1/datasets/{dataset_id}/heatmap
///
/// Similarity-ordered room × half-day occupancy matrix.
pub async fn get_heatmap(
    State(state): State<AppState>,
    Path(dataset_id): Path<i64>,
    Query(query): Query<FilterQuery>,
) -> HandlerResult<HeatmapData> {
    let (_, records) = filtered_records(&state, dataset_id, query)?;
    Ok(Json(services::compute_heatmap_data(&records)))
}

/// GET /v1/datasets/{dataset_id}/rooms/{room_id}/timeseries
///
/// Semester-aligned occupancy time series for one room. The room is an
/// explicit path parameter; there is no session-carried selection.
pub async fn get_timeseries(
    State(state): State<AppState>,
    Path((dataset_id, room_id)): Path<(i64, String)>,
    Query(query): Query<FilterQuery>,
) -> HandlerResult<AlignedTimeSeries> {
    let semester = query
        .semester
        .clone()
        .map(|label| {
            crate::models::SemesterSelection::from_label(&label)
                .ok_or_else(|| AppError::BadRequest(format!("invalid semester '{}'", label)))
        })
        .transpose()?
        .unwrap_or_default();

    let (_, records) = filtered_records(&state, dataset_id, query)?;
    Ok(Json(services::compute_aligned_series(
        &records, &room_id, semester,
    )))
}

/// Look up a dataset and apply the filter query to its records.
fn filtered_records(
    state: &AppState,
    dataset_id: i64,
    query: FilterQuery,
) -> Result<(Arc<Dataset>, Vec<OccupancyRecord>), AppError> {
    let dataset = state
        .store
        .get(dataset_id)
        .ok_or_else(|| AppError::NotFound(format!("dataset {} not found", dataset_id)))?;

    let config = query.into_config().map_err(AppError::BadRequest)?;
    let records = services::apply_filters(&dataset.records, &config);
    Ok((dataset, records))
}
