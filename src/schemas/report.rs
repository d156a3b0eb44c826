use serde::Serialize;

use super::grading::{AnswerProgress, GradingReport};
use super::numbering::NumberingOutcome;

/// Everything one engine run produces, printed as JSON by the runner.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineReport {
    pub test_title: String,
    pub numbering: NumberingOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<AnswerProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grading: Option<GradingReport>,
    pub generated_at: String,
}
