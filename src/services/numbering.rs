use std::collections::BTreeMap;

use thiserror::Error;

use crate::schemas::numbering::{NumberingAnomaly, NumberingOutcome};
use crate::schemas::question_group::{
    AuthoredGroup, DiagramLabelGroup, FlowChartGroup, MatchingEndingsGroup, MatchingFeaturesGroup,
    MatchingGroup, MatchingHeadingsGroup, MatchingInformationGroup, MultipleAnswersGroup,
    MultipleChoiceGroup, NoteCompletionGroup, QuestionGroup, Renumber, SentenceCompletionGroup,
    ShortAnswerGroup, StatementGroup, SummaryCompletionGroup, TableCompletionGroup, TableRow,
};
use crate::schemas::stats::{format_question_range, SectionStat};
use crate::schemas::test::{Section, TestDefinition};
use crate::schemas::types::QuestionType;
use crate::services::statistics::summarize;

const FIRST_QUESTION_NUMBER: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContiguityError {
    #[error("question at position {position} has no number")]
    Unnumbered { position: usize },
    #[error("expected question {expected}, found {found}")]
    OutOfSequence { expected: u32, found: u32 },
    #[error("numbered {counted} questions but total_questions is {total}")]
    TotalMismatch { counted: u32, total: u32 },
}

/// Numbers a whole test and checks its section count against the skill.
pub fn number_test(definition: &TestDefinition) -> NumberingOutcome {
    let mut outcome = number_sections(&definition.sections);

    let expected = definition.skill.expected_sections();
    let actual = definition.sections.len();
    if expected != actual {
        tracing::warn!(
            skill = definition.skill.as_str(),
            expected,
            actual,
            "Test has an unexpected number of sections"
        );
        outcome.anomalies.push(NumberingAnomaly::SectionCountMismatch {
            skill: definition.skill.as_str().to_string(),
            expected,
            actual,
        });
    }

    outcome
}

/// Assigns one contiguous numbering across all sections.
///
/// The input is never modified: every numbered section, group and question is
/// a freshly built value. Groups that cannot be numbered are carried over
/// verbatim, reported as anomalies, and consume no numbers.
pub fn number_sections(sections: &[Section]) -> NumberingOutcome {
    let tally = sections.iter().enumerate().fold(
        TestTally::new(sections.len()),
        |tally, (index, section)| tally.absorb(index as u32 + 1, section),
    );

    let total_questions = tally.next - FIRST_QUESTION_NUMBER;
    let summary = summarize(&tally.stats);

    metrics::counter!("numbering_passes_total").increment(1);
    tracing::debug!(
        sections = sections.len(),
        total_questions,
        anomalies = tally.anomalies.len(),
        "Numbering pass completed"
    );

    NumberingOutcome {
        numbered_sections: tally.sections,
        total_questions,
        section_stats: tally.stats,
        summary,
        anomalies: tally.anomalies,
    }
}

impl NumberingOutcome {
    /// Checks that numbers run `1..=total_questions` in section, group and
    /// question order with no gaps or duplicates.
    pub fn verify_contiguity(&self) -> Result<(), ContiguityError> {
        let mut expected = FIRST_QUESTION_NUMBER;
        let mut position = 0usize;

        let groups = self
            .numbered_sections
            .iter()
            .flat_map(|section| section.question_groups.iter())
            .filter_map(AuthoredGroup::parsed);

        for group in groups {
            for question in group.atomic_questions() {
                let found = question.number().ok_or(ContiguityError::Unnumbered { position })?;
                if found != expected {
                    return Err(ContiguityError::OutOfSequence { expected, found });
                }
                expected += 1;
                position += 1;
            }
        }

        let counted = expected - FIRST_QUESTION_NUMBER;
        if counted != self.total_questions {
            return Err(ContiguityError::TotalMismatch { counted, total: self.total_questions });
        }

        Ok(())
    }
}

#[derive(Debug)]
struct TestTally {
    sections: Vec<Section>,
    stats: Vec<SectionStat>,
    anomalies: Vec<NumberingAnomaly>,
    next: u32,
}

impl TestTally {
    fn new(capacity: usize) -> Self {
        Self {
            sections: Vec::with_capacity(capacity),
            stats: Vec::with_capacity(capacity),
            anomalies: Vec::new(),
            next: FIRST_QUESTION_NUMBER,
        }
    }

    fn absorb(mut self, section_number: u32, section: &Section) -> Self {
        let start = self.next;
        let tally = section.question_groups.iter().enumerate().fold(
            SectionTally::new(start, section.question_groups.len()),
            |tally, (group_index, group)| tally.absorb(section_number, group_index, group),
        );

        let question_count = tally.next - start;
        let (first_question, last_question) =
            if question_count > 0 { (Some(start), Some(tally.next - 1)) } else { (None, None) };

        self.stats.push(SectionStat {
            section_number,
            title: section.resource.title().to_string(),
            difficulty: section.resource.difficulty(),
            question_count,
            question_range: format_question_range(first_question, last_question),
            first_question,
            last_question,
            question_type_counts: tally.type_counts,
        });
        self.sections
            .push(Section { resource: section.resource.clone(), question_groups: tally.groups });
        self.anomalies.extend(tally.anomalies);
        self.next = tally.next;
        self
    }
}

#[derive(Debug)]
struct SectionTally {
    groups: Vec<AuthoredGroup>,
    type_counts: BTreeMap<QuestionType, u32>,
    anomalies: Vec<NumberingAnomaly>,
    next: u32,
}

impl SectionTally {
    fn new(next: u32, capacity: usize) -> Self {
        Self {
            groups: Vec::with_capacity(capacity),
            type_counts: BTreeMap::new(),
            anomalies: Vec::new(),
            next,
        }
    }

    fn absorb(mut self, section_number: u32, group_index: usize, authored: &AuthoredGroup) -> Self {
        match authored {
            AuthoredGroup::Parsed(group) => {
                let (numbered, next) = number_group(group, self.next);
                let assigned = next - self.next;
                if assigned > 0 {
                    *self.type_counts.entry(group.question_type()).or_insert(0) += assigned;
                }
                self.groups.push(AuthoredGroup::Parsed(numbered));
                self.next = next;
            }
            AuthoredGroup::Raw(_) => {
                if let Some(defect) = authored.defect() {
                    tracing::warn!(
                        section = section_number,
                        group = group_index,
                        defect = ?defect,
                        "Skipping question group that cannot be numbered"
                    );
                    metrics::counter!("numbering_skipped_groups_total").increment(1);
                    self.anomalies.push(NumberingAnomaly::SkippedGroup {
                        section_number,
                        group_index,
                        defect,
                    });
                }
                self.groups.push(authored.clone());
            }
        }
        self
    }
}

fn number_records<T: Renumber>(records: &[T], next: u32) -> (Vec<T>, u32) {
    records.iter().fold((Vec::with_capacity(records.len()), next), |(mut numbered, cursor), record| {
        if record.requires_response() {
            numbered.push(record.with_number(Some(cursor)));
            (numbered, cursor + 1)
        } else {
            numbered.push(record.with_number(None));
            (numbered, cursor)
        }
    })
}

fn number_statements(group: &StatementGroup, next: u32) -> (StatementGroup, u32) {
    let (questions, next) = number_records(&group.questions, next);
    let numbered = StatementGroup {
        instruction: group.instruction.clone(),
        questions,
        extra: group.extra.clone(),
    };
    (numbered, next)
}

/// Returns the numbered copy of `group` and the next free number.
fn number_group(group: &QuestionGroup, next: u32) -> (QuestionGroup, u32) {
    match group {
        QuestionGroup::MultipleChoice(group) => {
            let (questions, next) = number_records(&group.questions, next);
            let numbered = MultipleChoiceGroup {
                instruction: group.instruction.clone(),
                questions,
                extra: group.extra.clone(),
            };
            (QuestionGroup::MultipleChoice(numbered), next)
        }
        QuestionGroup::MultipleChoiceMultipleAnswers(group) => {
            let (questions, next) = number_records(&group.questions, next);
            let numbered = MultipleAnswersGroup {
                instruction: group.instruction.clone(),
                question: group.question.clone(),
                options: group.options.clone(),
                questions,
                extra: group.extra.clone(),
            };
            (QuestionGroup::MultipleChoiceMultipleAnswers(numbered), next)
        }
        QuestionGroup::TrueFalseNotGiven(group) => {
            let (numbered, next) = number_statements(group, next);
            (QuestionGroup::TrueFalseNotGiven(numbered), next)
        }
        QuestionGroup::YesNoNotGiven(group) => {
            let (numbered, next) = number_statements(group, next);
            (QuestionGroup::YesNoNotGiven(numbered), next)
        }
        QuestionGroup::MatchingHeadings(group) => {
            let (questions, next) = number_records(&group.questions, next);
            let numbered = MatchingHeadingsGroup {
                instruction: group.instruction.clone(),
                headings: group.headings.clone(),
                questions,
                extra: group.extra.clone(),
            };
            (QuestionGroup::MatchingHeadings(numbered), next)
        }
        QuestionGroup::MatchingInformation(group) => {
            let (questions, next) = number_records(&group.questions, next);
            let numbered = MatchingInformationGroup {
                instruction: group.instruction.clone(),
                paragraph_labels: group.paragraph_labels.clone(),
                questions,
                extra: group.extra.clone(),
            };
            (QuestionGroup::MatchingInformation(numbered), next)
        }
        QuestionGroup::MatchingFeatures(group) => {
            let (questions, next) = number_records(&group.questions, next);
            let numbered = MatchingFeaturesGroup {
                instruction: group.instruction.clone(),
                features: group.features.clone(),
                questions,
                extra: group.extra.clone(),
            };
            (QuestionGroup::MatchingFeatures(numbered), next)
        }
        QuestionGroup::MatchingSentenceEndings(group) => {
            let (questions, next) = number_records(&group.questions, next);
            let numbered = MatchingEndingsGroup {
                instruction: group.instruction.clone(),
                endings: group.endings.clone(),
                questions,
                extra: group.extra.clone(),
            };
            (QuestionGroup::MatchingSentenceEndings(numbered), next)
        }
        QuestionGroup::Matching(group) => {
            let (questions, next) = number_records(&group.questions, next);
            let numbered = MatchingGroup {
                instruction: group.instruction.clone(),
                options: group.options.clone(),
                questions,
                extra: group.extra.clone(),
            };
            (QuestionGroup::Matching(numbered), next)
        }
        QuestionGroup::SentenceCompletion(group) => {
            let (questions, next) = number_records(&group.questions, next);
            let numbered = SentenceCompletionGroup {
                instruction: group.instruction.clone(),
                questions,
                extra: group.extra.clone(),
            };
            (QuestionGroup::SentenceCompletion(numbered), next)
        }
        QuestionGroup::ShortAnswer(group) => {
            let (questions, next) = number_records(&group.questions, next);
            let numbered = ShortAnswerGroup {
                instruction: group.instruction.clone(),
                questions,
                extra: group.extra.clone(),
            };
            (QuestionGroup::ShortAnswer(numbered), next)
        }
        QuestionGroup::SummaryCompletion(group) => {
            let (gaps, next) = number_records(&group.gaps, next);
            let numbered = SummaryCompletionGroup {
                instruction: group.instruction.clone(),
                summary: group.summary.clone(),
                word_bank: group.word_bank.clone(),
                gaps,
                extra: group.extra.clone(),
            };
            (QuestionGroup::SummaryCompletion(numbered), next)
        }
        QuestionGroup::NoteCompletion(group) => {
            let (gaps, next) = number_records(&group.gaps, next);
            let numbered = NoteCompletionGroup {
                instruction: group.instruction.clone(),
                title: group.title.clone(),
                gaps,
                extra: group.extra.clone(),
            };
            (QuestionGroup::NoteCompletion(numbered), next)
        }
        QuestionGroup::TableCompletion(group) => {
            let (rows, next) = group.rows.iter().fold(
                (Vec::with_capacity(group.rows.len()), next),
                |(mut rows, cursor), row| {
                    let (cells, cursor) = number_records(&row.cells, cursor);
                    rows.push(TableRow { cells, extra: row.extra.clone() });
                    (rows, cursor)
                },
            );
            let numbered = TableCompletionGroup {
                instruction: group.instruction.clone(),
                columns: group.columns.clone(),
                rows,
                extra: group.extra.clone(),
            };
            (QuestionGroup::TableCompletion(numbered), next)
        }
        QuestionGroup::FlowChartCompletion(group) => {
            let starting_question_number = Some(next);
            let (steps, next) = number_records(&group.steps, next);
            let numbered = FlowChartGroup {
                instruction: group.instruction.clone(),
                title: group.title.clone(),
                starting_question_number,
                steps,
                extra: group.extra.clone(),
            };
            (QuestionGroup::FlowChartCompletion(numbered), next)
        }
        QuestionGroup::DiagramLabelCompletion(group) => {
            let (labels, next) = number_records(&group.labels, next);
            let numbered = DiagramLabelGroup {
                instruction: group.instruction.clone(),
                diagram: group.diagram.clone(),
                labels,
                extra: group.extra.clone(),
            };
            (QuestionGroup::DiagramLabelCompletion(numbered), next)
        }
    }
}
