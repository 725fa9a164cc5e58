// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use mindscan_inference::InferenceAdapter;
use mindscan_server::{
    build_router, validate_startup_config_contract, ApiConfig, AppState, ModelStoreConfig,
};
use std::env;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                error!("failed to register unix signal handlers; falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("MINDSCAN_LOG_JSON", true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("MINDSCAN_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let models_cfg = ModelStoreConfig {
        model_dir: PathBuf::from(env::var("MINDSCAN_MODEL_DIR").unwrap_or_else(|_| "m".to_string())),
    };
    let api_cfg = ApiConfig {
        max_body_bytes: env_usize("MINDSCAN_MAX_BODY_BYTES", 16 * 1024),
        enable_html_views: env_bool("MINDSCAN_ENABLE_HTML_VIEWS", true),
        shutdown_drain: env_duration_ms("MINDSCAN_SHUTDOWN_DRAIN_MS", 2000),
    };
    validate_startup_config_contract(&api_cfg, &models_cfg)
        .map_err(|e| format!("invalid startup config: {e}"))?;

    // Models and column order are loaded exactly once; a bad artifact set is fatal.
    let adapter = InferenceAdapter::load_dir(&models_cfg.model_dir)
        .map_err(|e| format!("model artifacts failed to load: {e}"))?;
    info!(
        model_dir = %models_cfg.model_dir.display(),
        artifacts = adapter.digests().len(),
        "model artifacts ready"
    );

    let shutdown_drain = api_cfg.shutdown_drain;
    let state = AppState::with_config(Arc::new(adapter), api_cfg);
    let app = build_router(state.clone());

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!("mindscan-server listening on {bind_addr}");
    let ready = state.ready.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            ready.store(false, Ordering::Relaxed);
            info!("shutdown requested; draining in-flight requests");
            tokio::time::sleep(shutdown_drain).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
