use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tokio::task::JoinError;

use crate::services::batch::BatchError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    Validation(#[from] garde::Report),

    #[error("Batch of {size} labels exceeds the limit of {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    #[error("Verification task failed: {0}")]
    Task(#[from] JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(report) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Invalid request: {}", report),
            ),
            ApiError::BatchTooLarge { .. } => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            ApiError::Batch(e) => {
                tracing::error!("Batch error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Batch verification failed".to_string(),
                )
            }
            ApiError::Task(e) => {
                tracing::error!("Verification task failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
