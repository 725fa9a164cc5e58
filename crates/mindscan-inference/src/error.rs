// SPDX-License-Identifier: Apache-2.0

use mindscan_model::Domain;
use std::fmt;
use std::path::PathBuf;

/// A classifier could not produce a class id for a feature vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceError(pub String);

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for InferenceError {}

/// A startup artifact is unreadable or malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactError {
    pub path: PathBuf,
    pub message: String,
}

impl ArtifactError {
    pub(crate) fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

impl std::error::Error for ArtifactError {}

/// A classifier's input width disagrees with the expected column list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthMismatch {
    pub domain: Domain,
    pub model_features: usize,
    pub expected_columns: usize,
}

impl fmt::Display for WidthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} model expects {} features, expected columns list {}",
            self.domain, self.model_features, self.expected_columns
        )
    }
}

impl std::error::Error for WidthMismatch {}
