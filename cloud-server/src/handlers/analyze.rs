//! Analysis handler

use axum::{body::Bytes, extract::State, Json};
use credlens_core::{AnalysisInput, AnalysisResult, NewBusinessRecord};

use crate::models::Business;
use crate::AppState;

/// Score a business. The body is parsed leniently and the call never fails:
/// a storage error is logged and the result is still returned.
pub async fn analyze(State(state): State<AppState>, body: Bytes) -> Json<AnalysisResult> {
    let input = AnalysisInput::from_json_lenient(&body);
    let engine = state.engine.current();
    let result = engine.analyze(&input);

    let record = NewBusinessRecord::from_analysis(&input, result.risk);
    match Business::insert(&state.pool, &record).await {
        Ok(id) => {
            tracing::debug!(id, risk = %result.risk, "Stored analyzed business");
            if state.config.auto_retrain {
                state.retrain.request();
            }
        }
        Err(e) => tracing::error!("Failed to store analyzed business: {}", e),
    }

    Json(result)
}
