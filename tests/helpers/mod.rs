//! Test helper utilities for E2E testing

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::OnceLock;

use label_verify_core::{app_state::AppState, config::AppConfig, routes};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde_json::{json, Value};

use crate::fixtures::LabelFixture;

/// The global metrics recorder can only be installed once per process.
fn prometheus_handle() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE
        .get_or_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .expect("Failed to install Prometheus recorder");
            routes::metrics::describe_metrics();
            handle
        })
        .clone()
}

/// A server running in-process on an ephemeral port.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Start the API with default configuration.
pub async fn spawn_server() -> TestServer {
    spawn_server_with(AppConfig::default()).await
}

/// Start the API with the given configuration; `bind_addr` is ignored.
pub async fn spawn_server_with(config: AppConfig) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind ephemeral port");
    let addr: SocketAddr = listener.local_addr().expect("No local address");

    let app = routes::router(AppState::new(config, prometheus_handle()));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    TestServer {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
    }
}

/// JSON body for POST /api/v1/verify.
pub fn verify_body(fixture: &LabelFixture) -> Value {
    json!({
        "extracted_text": fixture.extracted_text(),
        "fields": fixture.fields(),
    })
}

/// POST a single verification and return status plus JSON body.
pub async fn post_verify(
    server: &TestServer,
    body: &Value,
) -> Result<(reqwest::StatusCode, Value), reqwest::Error> {
    let response = server
        .client
        .post(server.url("/api/v1/verify"))
        .json(body)
        .send()
        .await?;
    let status = response.status();
    Ok((status, response.json().await?))
}

/// POST a batch and return status plus JSON body.
pub async fn post_batch(
    server: &TestServer,
    labels: Vec<Value>,
) -> Result<(reqwest::StatusCode, Value), reqwest::Error> {
    let response = server
        .client
        .post(server.url("/api/v1/verify/batch"))
        .json(&json!({ "labels": labels }))
        .send()
        .await?;
    let status = response.status();
    Ok((status, response.json().await?))
}
