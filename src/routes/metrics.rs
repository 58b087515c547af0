use axum::extract::State;
use axum::response::IntoResponse;

use crate::app_state::AppState;
use crate::models::label::LabelVerificationReport;

pub const VERIFICATIONS_TOTAL: &str = "label_verifications_total";
pub const FIELD_FAILURES_TOTAL: &str = "label_field_failures_total";
pub const VERIFICATION_SECONDS: &str = "label_verification_seconds";
pub const BATCH_SIZE: &str = "label_batch_size";

/// Prometheus metrics scrape endpoint.
/// Returns metrics in Prometheus text exposition format.
pub async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    state.prometheus.render()
}

/// Register descriptions for the application metrics.
pub fn describe_metrics() {
    metrics::describe_counter!(
        VERIFICATIONS_TOTAL,
        "Label verifications by outcome (pass, fail, error)"
    );
    metrics::describe_counter!(
        FIELD_FAILURES_TOTAL,
        "Failed field checks by field name"
    );
    metrics::describe_histogram!(
        VERIFICATION_SECONDS,
        "Time to verify one label"
    );
    metrics::describe_histogram!(BATCH_SIZE, "Labels per batch request");
}

/// Record the outcome of one verification.
pub fn record_report(report: &LabelVerificationReport) {
    let outcome = if !report.success {
        "error"
    } else if report.overall_pass {
        "pass"
    } else {
        "fail"
    };
    metrics::counter!(VERIFICATIONS_TOTAL, "outcome" => outcome).increment(1);
    metrics::histogram!(VERIFICATION_SECONDS).record(report.processing_time_seconds);

    for (field, _) in report.failed_fields() {
        let field: &'static str = field.into();
        metrics::counter!(FIELD_FAILURES_TOTAL, "field" => field).increment(1);
    }
}

pub fn record_batch_size(size: usize) {
    metrics::histogram!(BATCH_SIZE).record(size as f64);
}
