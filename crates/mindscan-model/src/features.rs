// SPDX-License-Identifier: Apache-2.0

use crate::quiz::{question_slot, QuizSubmission, QUESTION_COUNT};
use crate::ValidationError;
use serde::{Deserialize, Serialize};

/// Column order the classifiers were trained with. Loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ExpectedColumns {
    names: Vec<String>,
    slots: Vec<usize>,
}

impl ExpectedColumns {
    /// Accepts a permutation of `q1..q40`; anything else is rejected.
    pub fn parse(names: Vec<String>) -> Result<Self, ValidationError> {
        if names.len() != QUESTION_COUNT {
            return Err(ValidationError(format!(
                "expected columns must list {QUESTION_COUNT} questions, got {}",
                names.len()
            )));
        }
        let mut seen = [false; QUESTION_COUNT];
        let mut slots = Vec::with_capacity(names.len());
        for name in &names {
            let slot = question_slot(name)
                .ok_or_else(|| ValidationError(format!("unknown expected column: {name}")))?;
            if seen[slot] {
                return Err(ValidationError(format!("duplicate expected column: {name}")));
            }
            seen[slot] = true;
            slots.push(slot);
        }
        Ok(Self { names, slots })
    }

    /// Canonical `q1..q40` order.
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            names: crate::question_keys(),
            slots: (0..QUESTION_COUNT).collect(),
        }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Reorders the submission's answers into model column order.
    #[must_use]
    pub fn align(&self, submission: &QuizSubmission) -> FeatureVector {
        let answers = submission.answers();
        FeatureVector(self.slots.iter().map(|&slot| answers[slot] as f64).collect())
    }
}

impl TryFrom<Vec<String>> for ExpectedColumns {
    type Error = ValidationError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ExpectedColumns> for Vec<String> {
    fn from(value: ExpectedColumns) -> Self {
        value.names
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
