// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Mindscan model SSOT.
//!
//! Domain vocabulary shared by the api, inference and server crates: the quiz
//! submission, the feature ordering the classifiers expect, and the fixed
//! label and recommendation tables.

mod domain;
mod features;
mod labels;
mod quiz;
mod recommendation;

pub use domain::Domain;
pub use features::{ExpectedColumns, FeatureVector};
pub use labels::{decode_label, DecodedResult, PredictionResult, UNKNOWN_LABEL};
pub use quiz::{question_key, question_keys, QuizSubmission, QUESTION_COUNT};
pub use recommendation::{recommend, Recommendation, NO_RECOMMENDATION};

use std::fmt::{Display, Formatter};

pub const CRATE_NAME: &str = "mindscan-model";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}
