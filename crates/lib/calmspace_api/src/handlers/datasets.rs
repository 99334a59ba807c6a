//! Retrieval corpus statistics.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::models::DatasetStatsResponse;

/// `GET /api/dataset-stats`: per-corpus shape; empty when nothing loaded.
pub async fn dataset_stats(State(state): State<AppState>) -> Json<DatasetStatsResponse> {
    let datasets = state.responder.datasets().stats();
    let total_entries = datasets.values().map(|s| s.rows).sum();
    Json(DatasetStatsResponse {
        status: "success",
        datasets,
        total_entries,
    })
}
