// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use mindscan_inference::InferenceAdapter;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;

mod config;
mod http;
mod middleware;
mod pipeline;
mod telemetry;

pub use config::{
    validate_startup_config_contract, ApiConfig, ModelStoreConfig, CONFIG_SCHEMA_VERSION,
};
pub use pipeline::{PipelineStage, QuizOutcome, QuizPipeline};

use telemetry::metrics::RequestMetrics;

pub const CRATE_NAME: &str = "mindscan-server";

#[derive(Clone)]
pub struct AppState {
    pub(crate) pipeline: Arc<QuizPipeline>,
    pub api: ApiConfig,
    pub ready: Arc<AtomicBool>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
    pub(crate) metrics: Arc<RequestMetrics>,
}

impl AppState {
    #[must_use]
    pub fn new(adapter: Arc<InferenceAdapter>) -> Self {
        Self::with_config(adapter, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(adapter: Arc<InferenceAdapter>, api: ApiConfig) -> Self {
        Self {
            pipeline: Arc::new(QuizPipeline::new(adapter)),
            api,
            ready: Arc::new(AtomicBool::new(true)),
            request_id_seed: Arc::new(AtomicU64::new(1)),
            metrics: Arc::new(RequestMetrics::default()),
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        use mindscan_inference::ConstantClassifier;
        let adapter = InferenceAdapter::new(
            mindscan_model::ExpectedColumns::canonical(),
            Arc::new(ConstantClassifier::new(0)),
            Arc::new(ConstantClassifier::new(0)),
            Arc::new(ConstantClassifier::new(0)),
        )
        .expect("constant adapter");
        Self::new(Arc::new(adapter))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::handlers::landing_handler))
        .route("/predict", post(http::handlers::predict_handler))
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/readyz", get(http::handlers::readyz_handler))
        .route("/metrics", get(http::handlers::metrics_handler))
        .route("/v1/openapi.json", get(http::handlers::openapi_handler))
        .route("/v1/version", get(http::handlers::version_handler))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
