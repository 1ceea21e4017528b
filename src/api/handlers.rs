use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::instrument;

use super::HealthResponse;
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::mentor::MentorReport;
use crate::screenshots::ChartScreenshots;

#[instrument(skip(state))]
pub async fn ai_mentor(State(state): State<Arc<AppState>>) -> Result<Json<MentorReport>, AppError> {
    let report = state.mentor.run().await?;
    tracing::info!(
        chars = report.analysis.len(),
        audio_url = %report.audio_url,
        "Analysis delivered"
    );
    Ok(Json(report))
}

#[instrument]
pub async fn chart_screenshots() -> Json<ChartScreenshots> {
    Json(ChartScreenshots)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
