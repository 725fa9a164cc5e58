// SPDX-License-Identifier: Apache-2.0

use crate::loader::artifact_path;
use crate::{
    load_expected_columns, load_model_artifact, ArtifactDigest, ArtifactError, Classifier,
    InferenceError, WidthMismatch, EXPECTED_COLUMNS_FILE,
};
use mindscan_model::{Domain, ExpectedColumns, PredictionResult, QuizSubmission};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// The three domain classifiers plus the column order they were trained
/// with. Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct InferenceAdapter {
    columns: ExpectedColumns,
    depression: Arc<dyn Classifier>,
    satisfaction: Arc<dyn Classifier>,
    personality: Arc<dyn Classifier>,
    digests: Vec<ArtifactDigest>,
}

impl InferenceAdapter {
    /// Fails when a classifier's width differs from the column count, so a
    /// mismatched artifact set is caught at startup rather than per request.
    pub fn new(
        columns: ExpectedColumns,
        depression: Arc<dyn Classifier>,
        satisfaction: Arc<dyn Classifier>,
        personality: Arc<dyn Classifier>,
    ) -> Result<Self, WidthMismatch> {
        for (domain, model) in [
            (Domain::Depression, &depression),
            (Domain::Satisfaction, &satisfaction),
            (Domain::Personality, &personality),
        ] {
            if model.n_features() != columns.len() {
                return Err(WidthMismatch {
                    domain,
                    model_features: model.n_features(),
                    expected_columns: columns.len(),
                });
            }
        }
        Ok(Self {
            columns,
            depression,
            satisfaction,
            personality,
            digests: Vec::new(),
        })
    }

    /// Loads `dep_model.json`, `sat_model.json`, `big_model.json` and
    /// `expected_columns.json` from `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, ArtifactError> {
        let columns_path = artifact_path(dir, EXPECTED_COLUMNS_FILE);
        let (columns, columns_digest) = load_expected_columns(&columns_path)?;
        let mut digests = vec![columns_digest];
        let mut models = Vec::with_capacity(Domain::ALL.len());
        for domain in Domain::ALL {
            let (artifact, digest) = load_model_artifact(&artifact_path(dir, domain.artifact_file()))?;
            digests.push(digest);
            models.push(Arc::new(artifact) as Arc<dyn Classifier>);
        }
        let mut models = models.into_iter();
        let (Some(depression), Some(satisfaction), Some(personality)) =
            (models.next(), models.next(), models.next())
        else {
            return Err(ArtifactError::new(dir, "model set incomplete"));
        };
        let mut adapter = Self::new(columns, depression, satisfaction, personality)
            .map_err(|e| ArtifactError::new(dir, e.to_string()))?;
        adapter.digests = digests;
        Ok(adapter)
    }

    #[must_use]
    pub fn columns(&self) -> &ExpectedColumns {
        &self.columns
    }

    /// Digests of the files this adapter was loaded from; empty when built
    /// from in-memory classifiers.
    #[must_use]
    pub fn digests(&self) -> &[ArtifactDigest] {
        &self.digests
    }

    fn classifier(&self, domain: Domain) -> &dyn Classifier {
        match domain {
            Domain::Depression => self.depression.as_ref(),
            Domain::Satisfaction => self.satisfaction.as_ref(),
            Domain::Personality => self.personality.as_ref(),
        }
    }

    /// Aligns the submission to the model column order and runs the three
    /// classifiers. No retries.
    pub fn infer(&self, submission: &QuizSubmission) -> Result<PredictionResult, InferenceError> {
        let features = self.columns.align(submission);
        let predict = |domain: Domain| {
            self.classifier(domain)
                .predict(&features)
                .map_err(|e| InferenceError(format!("{domain} model: {e}")))
        };
        let prediction = PredictionResult {
            depression: predict(Domain::Depression)?,
            satisfaction: predict(Domain::Satisfaction)?,
            personality: predict(Domain::Personality)?,
        };
        debug!(?prediction, "inference complete");
        Ok(prediction)
    }
}
