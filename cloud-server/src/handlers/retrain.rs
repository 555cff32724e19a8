//! Retrain trigger

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct RetrainResponse {
    pub message: &'static str,
}

/// Schedule a retrain and return immediately
pub async fn trigger(State(state): State<AppState>) -> Json<RetrainResponse> {
    let message = if state.retrain.request() {
        "Retraining started"
    } else {
        "Retraining already in progress; another run is queued"
    };

    Json(RetrainResponse { message })
}
