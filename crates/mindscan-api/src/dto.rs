// SPDX-License-Identifier: Apache-2.0

use crate::ApiError;
use mindscan_model::{DecodedResult, Recommendation};
use serde::{Deserialize, Serialize};

pub const API_VERSION: &str = "v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    /// The quiz form, optionally annotated with an error.
    Input,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendationView {
    pub dep: String,
    pub sat: String,
    pub big: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResultsView {
    pub depression: String,
    pub satisfaction: String,
    pub personality: String,
    pub recommendation: RecommendationView,
}

impl ResultsView {
    #[must_use]
    pub fn new(decoded: &DecodedResult, recommendation: &Recommendation) -> Self {
        Self {
            depression: decoded.depression.to_string(),
            satisfaction: decoded.satisfaction.to_string(),
            personality: decoded.personality.to_string(),
            recommendation: RecommendationView {
                dep: recommendation.depression.to_string(),
                sat: recommendation.satisfaction.to_string(),
                big: recommendation.personality.to_string(),
            },
        }
    }
}

/// Response body of the quiz routes. Exactly one of `data` / `error` is set
/// for `results` / failed `input` views; a bare `input` view carries neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewEnvelope {
    pub api_version: String,
    pub view: ViewKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ResultsView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl ViewEnvelope {
    #[must_use]
    pub fn input() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            view: ViewKind::Input,
            data: None,
            error: None,
        }
    }

    #[must_use]
    pub fn input_with_error(error: ApiError) -> Self {
        Self {
            error: Some(error),
            ..Self::input()
        }
    }

    #[must_use]
    pub fn results(data: ResultsView) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            view: ViewKind::Results,
            data: Some(data),
            error: None,
        }
    }
}
