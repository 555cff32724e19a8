//! Business record handlers

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use validator::Validate;

use crate::models::{Business, CreateBusiness};
use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: i64,
}

/// All stored records, oldest first
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Business>>> {
    let businesses = Business::list_all(&state.pool).await?;
    Ok(Json(businesses))
}

/// Add a labeled example and schedule a retrain
pub async fn create(State(state): State<AppState>, body: Bytes) -> AppResult<Json<CreatedResponse>> {
    let req: CreateBusiness = serde_json::from_slice(&body)?;
    req.validate()?;

    let id = Business::insert(&state.pool, &req.into_record()).await?;
    tracing::info!(id, "Business added");

    state.retrain.request();

    Ok(Json(CreatedResponse {
        message: "Business added",
        id,
    }))
}
