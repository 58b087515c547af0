use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use crate::config::AppConfig;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub prometheus: PrometheusHandle,
}

impl AppState {
    pub fn new(config: AppConfig, prometheus: PrometheusHandle) -> Self {
        Self {
            config: Arc::new(config),
            prometheus,
        }
    }
}
