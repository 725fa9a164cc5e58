// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Model loading and inference.
//!
//! Classifiers are opaque `predict(vector) -> class id` capabilities behind
//! the [`Classifier`] trait. The JSON artifact adapters in [`artifact`] are
//! one way to provide them. The `test-support` feature adds
//! `ConstantClassifier` for wiring tests.

mod adapter;
pub mod artifact;
mod classifier;
mod error;
mod loader;

pub use adapter::InferenceAdapter;
pub use artifact::{ForestModel, LinearModel, ModelArtifact, TreeArtifact};
pub use classifier::Classifier;
#[cfg(any(test, feature = "test-support"))]
pub use classifier::ConstantClassifier;
pub use error::{ArtifactError, InferenceError, WidthMismatch};
pub use loader::{load_expected_columns, load_model_artifact, ArtifactDigest, EXPECTED_COLUMNS_FILE};

use sha2::{Digest, Sha256};

pub const CRATE_NAME: &str = "mindscan-inference";

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
