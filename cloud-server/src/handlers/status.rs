//! Engine status handler

use axum::{extract::State, Json};
use credlens_core::EngineStatus;
use serde::Serialize;

use crate::retrain::TrainingOutcome;
use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub engine: EngineStatus,
    pub records: i64,
    pub auto_retrain: bool,
    pub retrain_running: bool,
    pub last_training: Option<TrainingOutcome>,
}

pub async fn get(State(state): State<AppState>) -> AppResult<Json<StatusResponse>> {
    let records = crate::models::Business::count(&state.pool).await?;

    Ok(Json(StatusResponse {
        engine: state.engine.current().status(),
        records,
        auto_retrain: state.config.auto_retrain,
        retrain_running: state.retrain.is_running(),
        last_training: state.retrain.last_outcome().await,
    }))
}
