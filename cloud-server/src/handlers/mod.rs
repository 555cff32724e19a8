//! HTTP handlers

pub mod analyze;
pub mod businesses;
pub mod health;
pub mod retrain;
pub mod status;


use crate::AppError;

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
