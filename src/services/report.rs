use thiserror::Error;

use crate::core::time::{format_offset, now_utc};
use crate::schemas::grading::{OverrideMap, SubmittedAnswers};
use crate::schemas::report::EngineReport;
use crate::schemas::test::TestDefinition;
use crate::services::grading::{answer_progress, grade_sections};
use crate::services::numbering::{number_test, ContiguityError};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("numbering reported {count} anomalies and strict numbering is enabled")]
    StrictNumbering { count: usize },
    #[error("numbered test is not contiguous: {0}")]
    Contiguity(#[from] ContiguityError),
}

/// A submission to grade against the freshly numbered test.
#[derive(Debug, Clone, Copy)]
pub struct Submission<'a> {
    pub answers: &'a SubmittedAnswers,
    pub overrides: &'a OverrideMap,
}

pub fn build_report(
    definition: &TestDefinition,
    submission: Option<Submission<'_>>,
    strict_numbering: bool,
) -> Result<EngineReport, ReportError> {
    let numbering = number_test(definition);
    numbering.verify_contiguity()?;

    if !numbering.anomalies.is_empty() {
        if strict_numbering {
            return Err(ReportError::StrictNumbering { count: numbering.anomalies.len() });
        }
        tracing::warn!(anomalies = numbering.anomalies.len(), "Numbering finished with anomalies");
    }

    let (progress, grading) = match submission {
        Some(Submission { answers, overrides }) => (
            Some(answer_progress(answers, numbering.total_questions)),
            Some(grade_sections(&numbering.numbered_sections, answers, overrides)),
        ),
        None => (None, None),
    };

    Ok(EngineReport {
        test_title: definition.title.clone(),
        numbering,
        progress,
        grading,
        generated_at: format_offset(now_utc()),
    })
}
