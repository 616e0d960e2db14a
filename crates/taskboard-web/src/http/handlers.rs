//! Health, diagnostics, and placeholder page endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderValue, StatusCode, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use taskboard_config::OutputMode;
use taskboard_telemetry::{MetricsSnapshot, build_sha};
use tracing::error;

use crate::http::errors::ApiError;
use crate::state::ApiState;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    pub(crate) build: &'static str,
    pub(crate) output: OutputMode,
    pub(crate) metrics: MetricsSnapshot,
}

pub(crate) async fn health(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        build: build_sha(),
        output: state.config.output_mode(),
        metrics: state.telemetry.snapshot(),
    })
}

pub(crate) async fn public_config(
    State(state): State<Arc<ApiState>>,
) -> Json<BTreeMap<&'static str, String>> {
    Json(
        state
            .config
            .public_env()
            .into_iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect(),
    )
}

pub(crate) async fn metrics(State(state): State<Arc<ApiState>>) -> Result<Response, ApiError> {
    let body = state.telemetry.render().map_err(|err| {
        error!(error = %err, "failed to render metrics");
        ApiError::internal("failed to render metrics")
    })?;
    let mut response = (StatusCode::OK, body).into_response();
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; version=0.0.4"),
    );
    Ok(response)
}

pub(crate) async fn landing() -> &'static str {
    "Taskboard"
}

pub(crate) async fn dashboard() -> &'static str {
    "Taskboard dashboard"
}

pub(crate) async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("no route for {}", uri.path()))
}
