// SPDX-License-Identifier: Apache-2.0

use crate::http::form::{read_form_fields, FormFailure};
use crate::http::request_tracing::RequestTrace;
use crate::http::response_contract::view_response;
use crate::{AppState, QuizOutcome, CRATE_NAME};
use axum::extract::{Extension, Request, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use mindscan_api::{openapi_v1_spec, ApiError, ViewEnvelope};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::atomic::Ordering;
use tracing::error;

pub(crate) async fn landing_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    view_response(&headers, &state, &ViewEnvelope::input())
}

pub(crate) async fn predict_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    headers: HeaderMap,
    request: Request,
) -> Response {
    let outcome = match read_form_fields(request, &state).await {
        Ok(fields) => run_pipeline(&state, fields, &trace.request_id).await,
        Err(FormFailure::PassThrough(response)) => return response,
        Err(FormFailure::Unreadable(reason)) => {
            Err(ApiError::processing(reason).with_request_id(&trace.request_id))
        }
    };

    state
        .metrics
        .observe_prediction(outcome.as_ref().map(|o| &o.decoded))
        .await;
    let envelope = match outcome {
        Ok(outcome) => ViewEnvelope::results(outcome.view()),
        Err(err) => ViewEnvelope::input_with_error(err),
    };
    view_response(&headers, &state, &envelope)
}

async fn run_pipeline(
    state: &AppState,
    fields: BTreeMap<String, String>,
    request_id: &str,
) -> Result<QuizOutcome, ApiError> {
    let pipeline = state.pipeline.clone();
    let task_request_id = request_id.to_string();
    match tokio::task::spawn_blocking(move || pipeline.handle(&fields, &task_request_id)).await {
        Ok(result) => result,
        Err(e) => {
            error!(request_id, "inference task failed: {e}");
            Err(ApiError::processing(format!("inference task failed: {e}"))
                .with_request_id(request_id))
        }
    }
}

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub(crate) async fn readyz_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.ready.load(Ordering::Relaxed) {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not-ready")
    }
}

pub(crate) async fn version_handler(State(state): State<AppState>) -> impl IntoResponse {
    let adapter = state.pipeline.adapter();
    let payload = json!({
        "name": "mindscan",
        "version": env!("CARGO_PKG_VERSION"),
        "build_hash": option_env!("MINDSCAN_BUILD_HASH").unwrap_or("dev"),
        "server": {
            "crate": CRATE_NAME,
            "config_schema_version": crate::config::CONFIG_SCHEMA_VERSION,
        },
        "models": {
            "expected_columns": adapter.columns().len(),
            "artifacts": adapter.digests(),
        }
    });
    let mut response = Json(payload).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("public, max-age=30"));
    response
}

pub(crate) async fn openapi_handler() -> impl IntoResponse {
    Json(openapi_v1_spec())
}

pub(crate) async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; version=0.0.4"),
        )],
        state.metrics.render().await,
    )
}
