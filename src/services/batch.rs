//! Bounded concurrent verification of many labels.
//!
//! `verify_label` is CPU-bound, so each item runs on the blocking pool. A
//! semaphore caps how many run at once; results come back in input order.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{AcquireError, Semaphore};
use tokio::task::{JoinError, JoinSet};
use uuid::Uuid;

use crate::models::label::LabelVerificationReport;
use crate::models::verification::BatchItem;
use crate::services::validation::verify_label;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Verification worker failed: {0}")]
    Worker(#[from] JoinError),

    #[error("Worker pool closed: {0}")]
    PoolClosed(#[from] AcquireError),
}

/// Report for one batch item, tagged with the caller's id or a generated one.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub id: String,
    #[serde(flatten)]
    pub report: LabelVerificationReport,
}

/// Verify every item with at most `concurrency` verifications in flight.
///
/// A `concurrency` of zero is treated as one.
pub async fn verify_batch(
    items: Vec<BatchItem>,
    concurrency: usize,
) -> Result<Vec<BatchOutcome>, BatchError> {
    let total = items.len();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    tracing::debug!(total, concurrency, "Starting batch verification");

    for (index, item) in items.into_iter().enumerate() {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        tasks.spawn_blocking(move || {
            let _permit = permit;
            let id = item
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string());
            let report = verify_label(&item.extracted_text, &item.fields);
            (index, BatchOutcome { id, report })
        });
    }

    let mut slots: Vec<Option<BatchOutcome>> = (0..total).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, outcome) = joined.inspect_err(|e| {
            tracing::error!(error = %e, "Batch verification task failed");
        })?;
        slots[index] = Some(outcome);
    }

    Ok(slots.into_iter().flatten().collect())
}
