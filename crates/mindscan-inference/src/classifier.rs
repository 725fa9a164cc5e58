// SPDX-License-Identifier: Apache-2.0

use crate::InferenceError;
use mindscan_model::FeatureVector;

/// A trained model used as a black box: fixed-length feature vector in,
/// class id out. Implementations must be pure and safe to share across
/// request tasks.
pub trait Classifier: Send + Sync + std::fmt::Debug {
    /// Number of features `predict` expects.
    fn n_features(&self) -> usize;

    fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError>;
}

pub(crate) fn check_width(expected: usize, features: &FeatureVector) -> Result<(), InferenceError> {
    if features.len() != expected {
        return Err(InferenceError(format!(
            "X has {} features, but the model is expecting {expected} features as input",
            features.len()
        )));
    }
    Ok(())
}

/// Always answers the same class id. For wiring tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantClassifier {
    pub class_id: i64,
    pub n_features: usize,
}

#[cfg(any(test, feature = "test-support"))]
impl ConstantClassifier {
    #[must_use]
    pub const fn new(class_id: i64) -> Self {
        Self {
            class_id,
            n_features: mindscan_model::QUESTION_COUNT,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Classifier for ConstantClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError> {
        check_width(self.n_features, features)?;
        Ok(self.class_id)
    }
}
