// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub enable_html_views: bool,
    pub shutdown_drain: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 16 * 1024,
            enable_html_views: true,
            shutdown_drain: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelStoreConfig {
    pub model_dir: PathBuf,
}

impl Default for ModelStoreConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("m"),
        }
    }
}

pub fn validate_startup_config_contract(
    api: &ApiConfig,
    models: &ModelStoreConfig,
) -> Result<(), String> {
    // 40 short answers fit in well under 1 KiB.
    if api.max_body_bytes < 1024 {
        return Err("max_body_bytes must be >= 1024".to_string());
    }
    if models.model_dir.as_os_str().is_empty() {
        return Err("model_dir must not be empty".to_string());
    }
    if !models.model_dir.is_dir() {
        return Err(format!(
            "model_dir {} is not a directory",
            models.model_dir.display()
        ));
    }
    Ok(())
}
