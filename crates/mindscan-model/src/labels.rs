// SPDX-License-Identifier: Apache-2.0

use crate::Domain;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_LABEL: &str = "Unknown";

const DEPRESSION_LABELS: [&str; 5] = ["normal", "mild", "moderate", "severe", "extremely severe"];
const SATISFACTION_LABELS: [&str; 5] = [
    "dissatisfied",
    "below average",
    "average",
    "above average",
    "high",
];
const PERSONALITY_LABELS: [&str; 3] = ["low", "moderate", "high"];

fn label_table(domain: Domain) -> &'static [&'static str] {
    match domain {
        Domain::Depression => &DEPRESSION_LABELS,
        Domain::Satisfaction => &SATISFACTION_LABELS,
        Domain::Personality => &PERSONALITY_LABELS,
    }
}

/// Decodes a raw class id. Ids outside the domain table decode to
/// [`UNKNOWN_LABEL`] instead of failing.
#[must_use]
pub fn decode_label(domain: Domain, class_id: i64) -> &'static str {
    usize::try_from(class_id)
        .ok()
        .and_then(|idx| label_table(domain).get(idx).copied())
        .unwrap_or(UNKNOWN_LABEL)
}

/// Raw class ids produced by the three classifiers for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub depression: i64,
    pub satisfaction: i64,
    pub personality: i64,
}

impl PredictionResult {
    #[must_use]
    pub const fn class_id(&self, domain: Domain) -> i64 {
        match domain {
            Domain::Depression => self.depression,
            Domain::Satisfaction => self.satisfaction,
            Domain::Personality => self.personality,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecodedResult {
    pub depression: &'static str,
    pub satisfaction: &'static str,
    pub personality: &'static str,
}

impl DecodedResult {
    #[must_use]
    pub fn decode(prediction: &PredictionResult) -> Self {
        Self {
            depression: decode_label(Domain::Depression, prediction.depression),
            satisfaction: decode_label(Domain::Satisfaction, prediction.satisfaction),
            personality: decode_label(Domain::Personality, prediction.personality),
        }
    }

    #[must_use]
    pub const fn label(&self, domain: Domain) -> &'static str {
        match domain {
            Domain::Depression => self.depression,
            Domain::Satisfaction => self.satisfaction,
            Domain::Personality => self.personality,
        }
    }
}
