// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    MissingFields,
    ProcessingError,
}

impl ApiErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingFields => "missing_fields",
            Self::ProcessingError => "processing_error",
        }
    }
}

/// User-visible failure. Rendered into the input view; never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
    pub request_id: String,
}

impl ApiError {
    #[must_use]
    pub fn new(
        code: ApiErrorCode,
        message: impl Into<String>,
        details: Value,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            request_id: request_id.into(),
        }
    }

    /// `missing` must already be in `q1..q40` order.
    #[must_use]
    pub fn missing_fields(missing: &[String]) -> Self {
        Self::new(
            ApiErrorCode::MissingFields,
            format!("Missing questions: {missing:?}"),
            json!({ "missing": missing }),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn processing(description: impl fmt::Display) -> Self {
        let description = description.to_string();
        Self::new(
            ApiErrorCode::ProcessingError,
            format!("Server Error: {description}"),
            json!({ "description": description }),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    /// Missing keys carried by a `MissingFields` error; empty otherwise.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<String> {
        self.details
            .get("missing")
            .and_then(Value::as_array)
            .map(|keys| {
                keys.iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}
