// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod dto;
mod errors;
pub mod openapi;
mod params;

pub use dto::{RecommendationView, ResultsView, ViewEnvelope, ViewKind, API_VERSION};
pub use errors::{ApiError, ApiErrorCode};
pub use openapi::openapi_v1_spec;
pub use params::{parse_answer, parse_quiz_form, AnswerError};

pub const CRATE_NAME: &str = "mindscan-api";
