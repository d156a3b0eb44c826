use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::types::{GradeVerdict, OverrideStatus, QuestionType};

/// Submitted answers keyed by question number. `null` entries count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmittedAnswers(HashMap<u32, Option<String>>);

impl SubmittedAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question_number: u32, answer: impl Into<String>) {
        self.0.insert(question_number, Some(answer.into()));
    }

    pub fn get(&self, question_number: u32) -> Option<&str> {
        self.0.get(&question_number).and_then(|answer| answer.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0.iter().filter_map(|(number, answer)| answer.as_deref().map(|value| (*number, value)))
    }
}

impl FromIterator<(u32, String)> for SubmittedAnswers {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(number, answer)| (number, Some(answer))).collect())
    }
}

/// Instructor overrides keyed by question number. A missing entry means `auto`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideMap(HashMap<u32, OverrideStatus>);

impl OverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_number: u32) -> OverrideStatus {
        self.0.get(&question_number).copied().unwrap_or_default()
    }

    /// Returns the previous status. Setting `auto` clears the entry.
    pub fn set(&mut self, question_number: u32, status: OverrideStatus) -> OverrideStatus {
        let previous = match status {
            OverrideStatus::Auto => self.0.remove(&question_number),
            _ => self.0.insert(question_number, status),
        };
        previous.unwrap_or_default()
    }

    pub fn manual_count(&self) -> usize {
        self.0.values().filter(|status| **status != OverrideStatus::Auto).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetOverrideRequest {
    #[validate(range(min = 1, message = "question_number must be positive"))]
    pub question_number: u32,
    pub status: OverrideStatus,
}

/// A numbered question with its canonical answer resolved from the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradableQuestion<'a> {
    pub number: u32,
    pub question_type: QuestionType,
    pub canonical_answer: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionVerdict {
    pub number: u32,
    pub question_type: QuestionType,
    pub auto_verdict: GradeVerdict,
    #[serde(rename = "override")]
    pub override_status: OverrideStatus,
    pub final_verdict: GradeVerdict,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingReport {
    pub verdicts: Vec<QuestionVerdict>,
    pub correct: u32,
    pub incorrect: u32,
    pub unanswered: u32,
    pub overridden: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerProgress {
    pub answered: u32,
    pub total: u32,
}
