// SPDX-License-Identifier: Apache-2.0

use crate::ValidationError;
use serde::{Deserialize, Serialize};

pub const QUESTION_COUNT: usize = 40;

/// Form key of the 1-based question `number` (`q1`..`q40`).
#[must_use]
pub fn question_key(number: usize) -> String {
    format!("q{number}")
}

/// All question keys in canonical `q1..q40` order.
#[must_use]
pub fn question_keys() -> Vec<String> {
    (1..=QUESTION_COUNT).map(question_key).collect()
}

/// Zero-based answer slot of a canonical question key; `None` for anything
/// that is not exactly `q1`..`q40`.
#[must_use]
pub(crate) fn question_slot(key: &str) -> Option<usize> {
    let digits = key.strip_prefix('q')?;
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let number = digits.parse::<usize>().ok()?;
    (1..=QUESTION_COUNT).contains(&number).then(|| number - 1)
}

/// One complete set of quiz answers. Only constructible with exactly
/// `QUESTION_COUNT` values; slot `i` holds the answer to `q{i+1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct QuizSubmission {
    answers: Vec<i64>,
}

impl QuizSubmission {
    pub fn new(answers: Vec<i64>) -> Result<Self, ValidationError> {
        if answers.len() != QUESTION_COUNT {
            return Err(ValidationError(format!(
                "quiz submission requires {QUESTION_COUNT} answers, got {}",
                answers.len()
            )));
        }
        Ok(Self { answers })
    }

    #[must_use]
    pub fn answer(&self, key: &str) -> Option<i64> {
        question_slot(key).map(|slot| self.answers[slot])
    }

    #[must_use]
    pub fn answers(&self) -> &[i64] {
        &self.answers
    }
}

impl TryFrom<Vec<i64>> for QuizSubmission {
    type Error = ValidationError;

    fn try_from(value: Vec<i64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QuizSubmission> for Vec<i64> {
    fn from(value: QuizSubmission) -> Self {
        value.answers
    }
}
