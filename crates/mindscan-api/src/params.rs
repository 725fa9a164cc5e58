// SPDX-License-Identifier: Apache-2.0

use crate::ApiError;
use mindscan_model::{question_keys, QuizSubmission};
use std::collections::BTreeMap;
use std::fmt;
use std::num::IntErrorKind;

/// Why a submitted answer could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerError {
    NotAnInteger,
    /// Well-formed integer that does not fit in `i64`.
    OutOfRange,
}

impl fmt::Display for AnswerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnInteger => f.write_str("invalid integer"),
            Self::OutOfRange => f.write_str("integer out of range"),
        }
    }
}

impl std::error::Error for AnswerError {}

/// Parses one answer the way the quiz form submits it: an optionally signed
/// base-10 integer, surrounding whitespace allowed.
pub fn parse_answer(raw: &str) -> Result<i64, AnswerError> {
    raw.trim().parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => AnswerError::OutOfRange,
        _ => AnswerError::NotAnInteger,
    })
}

/// Validates a submitted form. Missing keys are reported together, in
/// `q1..q40` order; the first non-integer value becomes a processing error.
/// Unrecognized fields are ignored.
pub fn parse_quiz_form(form: &BTreeMap<String, String>) -> Result<QuizSubmission, ApiError> {
    let keys = question_keys();
    let missing: Vec<String> = keys
        .iter()
        .filter(|key| !form.contains_key(key.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::missing_fields(&missing));
    }

    let mut answers = Vec::with_capacity(keys.len());
    for key in &keys {
        let raw = &form[key.as_str()];
        let value = parse_answer(raw)
            .map_err(|e| ApiError::processing(format!("{e} for {key}: {raw:?}")))?;
        answers.push(value);
    }
    QuizSubmission::new(answers).map_err(ApiError::processing)
}
