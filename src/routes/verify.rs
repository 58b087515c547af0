use std::time::Instant;

use axum::extract::State;
use axum::Json;
use garde::Validate;

use crate::app_state::AppState;
use crate::models::label::LabelVerificationReport;
use crate::models::verification::{BatchVerifyRequest, BatchVerifyResponse, VerifyRequest};
use crate::routes::error::ApiError;
use crate::routes::metrics;
use crate::services::{batch, validation};

/// POST /api/v1/verify: verify one label's recognized text.
pub async fn verify_label(
    Json(request): Json<VerifyRequest>,
) -> Result<Json<LabelVerificationReport>, ApiError> {
    request.validate()?;

    let report = tokio::task::spawn_blocking(move || {
        validation::verify_label(&request.extracted_text, &request.fields)
    })
    .await?;

    metrics::record_report(&report);
    Ok(Json(report))
}

/// POST /api/v1/verify/batch: verify many labels on the bounded worker pool.
pub async fn verify_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchVerifyRequest>,
) -> Result<Json<BatchVerifyResponse>, ApiError> {
    let size = request.labels.len();
    let max = state.config.max_batch_size;
    if size > max {
        return Err(ApiError::BatchTooLarge { size, max });
    }
    request.validate()?;

    tracing::info!(size, "Processing batch verification");
    metrics::record_batch_size(size);

    let start = Instant::now();
    let results = batch::verify_batch(request.labels, state.config.batch_concurrency).await?;
    for outcome in &results {
        metrics::record_report(&outcome.report);
    }

    let response = BatchVerifyResponse::new(results, start.elapsed().as_secs_f64());
    tracing::info!(
        total = response.total,
        passed = response.passed,
        failed = response.failed,
        "Batch verification complete"
    );

    Ok(Json(response))
}
