use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::models::label::FieldValues;
use crate::services::batch::BatchOutcome;

/// Request to verify one label's recognized text against declared values.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyRequest {
    /// Text recognized from the label image. Empty is allowed and yields an
    /// unsuccessful report rather than a request error.
    #[serde(default)]
    #[garde(length(chars, max = 10_000))]
    pub extracted_text: String,

    #[serde(default)]
    #[garde(dive)]
    pub fields: FieldValues,
}

/// One label inside a batch request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BatchItem {
    /// Caller-chosen identifier echoed back in the result; generated when absent.
    #[serde(default)]
    #[garde(length(chars, max = 128))]
    pub id: Option<String>,

    #[serde(default)]
    #[garde(length(chars, max = 10_000))]
    pub extracted_text: String,

    #[serde(default)]
    #[garde(dive)]
    pub fields: FieldValues,
}

/// Request to verify many labels at once.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BatchVerifyRequest {
    #[garde(length(min = 1), dive)]
    pub labels: Vec<BatchItem>,
}

/// Summary of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchVerifyResponse {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Wall-clock seconds for the whole batch.
    pub processing_time: f64,
    pub results: Vec<BatchOutcome>,
}

impl BatchVerifyResponse {
    pub fn new(results: Vec<BatchOutcome>, processing_time: f64) -> Self {
        let passed = results
            .iter()
            .filter(|outcome| outcome.report.overall_pass)
            .count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            processing_time,
            results,
        }
    }
}
