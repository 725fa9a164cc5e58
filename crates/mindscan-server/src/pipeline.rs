// SPDX-License-Identifier: Apache-2.0

use mindscan_api::{parse_quiz_form, ApiError, ResultsView};
use mindscan_inference::InferenceAdapter;
use mindscan_model::{DecodedResult, PredictionResult, Recommendation};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Request lifecycle. Transitions only move forward; any stage may end in
/// `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Validating,
    Inferring,
    Decoding,
    Succeeded,
    Failed,
}

impl PipelineStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Validating => "validating",
            Self::Inferring => "inferring",
            Self::Decoding => "decoding",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub prediction: PredictionResult,
    pub decoded: DecodedResult,
    pub recommendation: Recommendation,
}

impl QuizOutcome {
    #[must_use]
    pub fn view(&self) -> ResultsView {
        ResultsView::new(&self.decoded, &self.recommendation)
    }
}

/// Validation, inference, decoding and recommendation for one submission.
/// Holds only read-only state and can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct QuizPipeline {
    adapter: Arc<InferenceAdapter>,
}

impl QuizPipeline {
    #[must_use]
    pub fn new(adapter: Arc<InferenceAdapter>) -> Self {
        Self { adapter }
    }

    #[must_use]
    pub fn adapter(&self) -> &InferenceAdapter {
        &self.adapter
    }

    /// Runs a submission to completion. Every failure comes back as an
    /// `ApiError` tagged with `request_id`; no partial result is returned.
    pub fn handle(
        &self,
        form: &BTreeMap<String, String>,
        request_id: &str,
    ) -> Result<QuizOutcome, ApiError> {
        let mut stage = PipelineStage::Received;
        match self.run(form, request_id, &mut stage) {
            Ok(outcome) => {
                info!(
                    request_id,
                    depression = outcome.decoded.depression,
                    satisfaction = outcome.decoded.satisfaction,
                    personality = outcome.decoded.personality,
                    "prediction succeeded"
                );
                Ok(outcome)
            }
            Err(err) => {
                let failed_at = fail(&mut stage, request_id);
                warn!(
                    request_id,
                    failed_at = failed_at.as_str(),
                    code = err.code.as_str(),
                    detail = %err.message,
                    "prediction failed"
                );
                Err(err.with_request_id(request_id))
            }
        }
    }

    fn run(
        &self,
        form: &BTreeMap<String, String>,
        request_id: &str,
        stage: &mut PipelineStage,
    ) -> Result<QuizOutcome, ApiError> {
        advance(stage, PipelineStage::Validating, request_id);
        let submission = parse_quiz_form(form)?;

        advance(stage, PipelineStage::Inferring, request_id);
        let prediction = self
            .adapter
            .infer(&submission)
            .map_err(ApiError::processing)?;

        advance(stage, PipelineStage::Decoding, request_id);
        let decoded = DecodedResult::decode(&prediction);
        let recommendation = Recommendation::for_decoded(&decoded);

        advance(stage, PipelineStage::Succeeded, request_id);
        Ok(QuizOutcome {
            prediction,
            decoded,
            recommendation,
        })
    }
}

fn advance(stage: &mut PipelineStage, next: PipelineStage, request_id: &str) {
    debug!(request_id, from = stage.as_str(), to = next.as_str(), "pipeline stage");
    *stage = next;
}

/// Moves to `Failed` and returns the stage the failure happened in.
fn fail(stage: &mut PipelineStage, request_id: &str) -> PipelineStage {
    let failed_at = *stage;
    advance(stage, PipelineStage::Failed, request_id);
    failed_at
}
