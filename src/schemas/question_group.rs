use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::QuestionType;

/// The smallest gradable unit inside a group.
///
/// Records that are not response targets (fixed table cells, plain flow-chart
/// steps) still implement this so a group's sequence can be walked uniformly,
/// but they never carry a number.
pub trait AtomicQuestion {
    fn number(&self) -> Option<u32>;
    fn canonical_answer(&self) -> &str;
    fn requires_response(&self) -> bool {
        true
    }
}

/// Copy of a record with its number (and secondary id, if the variant has one)
/// replaced.
pub trait Renumber: AtomicQuestion + Clone {
    fn with_number(&self, number: Option<u32>) -> Self;
}

macro_rules! atomic_record {
    ($record:ty, $canonical:ident) => {
        impl AtomicQuestion for $record {
            fn number(&self) -> Option<u32> {
                self.number
            }

            fn canonical_answer(&self) -> &str {
                &self.$canonical
            }
        }

        impl Renumber for $record {
            fn with_number(&self, number: Option<u32>) -> Self {
                Self { number, ..self.clone() }
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default)]
    pub statement: String,
    #[serde(default)]
    pub answer: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default)]
    pub paragraph: String,
    #[serde(default)]
    pub correct_heading: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InformationQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default)]
    pub statement: String,
    #[serde(default)]
    pub correct_paragraph: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default)]
    pub statement: String,
    #[serde(default)]
    pub correct_feature: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndingQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default)]
    pub sentence_start: String,
    #[serde(default)]
    pub correct_ending: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default)]
    pub statement: String,
    #[serde(default)]
    pub correct_match: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default)]
    pub sentence_with_blank: String,
    #[serde(default)]
    pub answer: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortAnswerQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

atomic_record!(ChoiceQuestion, correct_answer);
atomic_record!(AnswerSlot, correct_answer);
atomic_record!(StatementQuestion, answer);
atomic_record!(HeadingQuestion, correct_heading);
atomic_record!(InformationQuestion, correct_paragraph);
atomic_record!(FeatureQuestion, correct_feature);
atomic_record!(EndingQuestion, correct_ending);
atomic_record!(MatchQuestion, correct_match);
atomic_record!(SentenceQuestion, answer);
atomic_record!(ShortAnswerQuestion, answer);

/// A gap in note or summary text; `gap_id` mirrors the number for input binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap_id: Option<String>,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub answer: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AtomicQuestion for Gap {
    fn number(&self) -> Option<u32> {
        self.number
    }

    fn canonical_answer(&self) -> &str {
        &self.answer
    }
}

impl Renumber for Gap {
    fn with_number(&self, number: Option<u32>) -> Self {
        Self { number, gap_id: number.map(|value| value.to_string()), ..self.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A table cell is a blank when it carries an answer; otherwise it is fixed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AtomicQuestion for TableCell {
    fn number(&self) -> Option<u32> {
        self.number
    }

    fn canonical_answer(&self) -> &str {
        self.answer.as_deref().unwrap_or_default()
    }

    fn requires_response(&self) -> bool {
        self.answer.is_some()
    }
}

impl Renumber for TableCell {
    fn with_number(&self, number: Option<u32>) -> Self {
        Self { number, cell_id: number.map(|value| value.to_string()), ..self.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AtomicQuestion for FlowStep {
    fn number(&self) -> Option<u32> {
        self.number
    }

    fn canonical_answer(&self) -> &str {
        self.answer.as_deref().unwrap_or_default()
    }

    fn requires_response(&self) -> bool {
        self.answer.is_some()
    }
}

impl Renumber for FlowStep {
    fn with_number(&self, number: Option<u32>) -> Self {
        Self { number, step_id: number.map(|value| value.to_string()), ..self.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramLabel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub answer: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AtomicQuestion for DiagramLabel {
    fn number(&self) -> Option<u32> {
        self.number
    }

    fn canonical_answer(&self) -> &str {
        &self.answer
    }
}

impl Renumber for DiagramLabel {
    fn with_number(&self, number: Option<u32>) -> Self {
        Self { number, step_id: number.map(|value| value.to_string()), ..self.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceGroup {
    #[serde(default)]
    pub instruction: String,
    pub questions: Vec<ChoiceQuestion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// "Choose TWO letters": every answer slot is numbered, options are shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleAnswersGroup {
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub questions: Vec<AnswerSlot>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementGroup {
    #[serde(default)]
    pub instruction: String,
    pub questions: Vec<StatementQuestion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingHeadingsGroup {
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub headings: Vec<String>,
    pub questions: Vec<HeadingQuestion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingInformationGroup {
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub paragraph_labels: Vec<String>,
    pub questions: Vec<InformationQuestion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingFeaturesGroup {
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub questions: Vec<FeatureQuestion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingEndingsGroup {
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub endings: Vec<String>,
    pub questions: Vec<EndingQuestion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingGroup {
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub questions: Vec<MatchQuestion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceCompletionGroup {
    #[serde(default)]
    pub instruction: String,
    pub questions: Vec<SentenceQuestion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortAnswerGroup {
    #[serde(default)]
    pub instruction: String,
    pub questions: Vec<ShortAnswerQuestion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCompletionGroup {
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub word_bank: Vec<String>,
    pub gaps: Vec<Gap>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteCompletionGroup {
    #[serde(default)]
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub gaps: Vec<Gap>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCompletionGroup {
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowChartGroup {
    #[serde(default)]
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_question_number: Option<u32>,
    pub steps: Vec<FlowStep>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramLabelGroup {
    #[serde(default)]
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<String>,
    pub labels: Vec<DiagramLabel>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "questionType", rename_all = "kebab-case")]
pub enum QuestionGroup {
    MultipleChoice(MultipleChoiceGroup),
    MultipleChoiceMultipleAnswers(MultipleAnswersGroup),
    TrueFalseNotGiven(StatementGroup),
    YesNoNotGiven(StatementGroup),
    MatchingHeadings(MatchingHeadingsGroup),
    MatchingInformation(MatchingInformationGroup),
    MatchingFeatures(MatchingFeaturesGroup),
    MatchingSentenceEndings(MatchingEndingsGroup),
    Matching(MatchingGroup),
    SentenceCompletion(SentenceCompletionGroup),
    ShortAnswer(ShortAnswerGroup),
    SummaryCompletion(SummaryCompletionGroup),
    NoteCompletion(NoteCompletionGroup),
    TableCompletion(TableCompletionGroup),
    FlowChartCompletion(FlowChartGroup),
    DiagramLabelCompletion(DiagramLabelGroup),
}

impl QuestionGroup {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionGroup::MultipleChoice(_) => QuestionType::MultipleChoice,
            QuestionGroup::MultipleChoiceMultipleAnswers(_) => {
                QuestionType::MultipleChoiceMultipleAnswers
            }
            QuestionGroup::TrueFalseNotGiven(_) => QuestionType::TrueFalseNotGiven,
            QuestionGroup::YesNoNotGiven(_) => QuestionType::YesNoNotGiven,
            QuestionGroup::MatchingHeadings(_) => QuestionType::MatchingHeadings,
            QuestionGroup::MatchingInformation(_) => QuestionType::MatchingInformation,
            QuestionGroup::MatchingFeatures(_) => QuestionType::MatchingFeatures,
            QuestionGroup::MatchingSentenceEndings(_) => QuestionType::MatchingSentenceEndings,
            QuestionGroup::Matching(_) => QuestionType::Matching,
            QuestionGroup::SentenceCompletion(_) => QuestionType::SentenceCompletion,
            QuestionGroup::ShortAnswer(_) => QuestionType::ShortAnswer,
            QuestionGroup::SummaryCompletion(_) => QuestionType::SummaryCompletion,
            QuestionGroup::NoteCompletion(_) => QuestionType::NoteCompletion,
            QuestionGroup::TableCompletion(_) => QuestionType::TableCompletion,
            QuestionGroup::FlowChartCompletion(_) => QuestionType::FlowChartCompletion,
            QuestionGroup::DiagramLabelCompletion(_) => QuestionType::DiagramLabelCompletion,
        }
    }

    pub fn instruction(&self) -> &str {
        match self {
            QuestionGroup::MultipleChoice(group) => &group.instruction,
            QuestionGroup::MultipleChoiceMultipleAnswers(group) => &group.instruction,
            QuestionGroup::TrueFalseNotGiven(group) | QuestionGroup::YesNoNotGiven(group) => {
                &group.instruction
            }
            QuestionGroup::MatchingHeadings(group) => &group.instruction,
            QuestionGroup::MatchingInformation(group) => &group.instruction,
            QuestionGroup::MatchingFeatures(group) => &group.instruction,
            QuestionGroup::MatchingSentenceEndings(group) => &group.instruction,
            QuestionGroup::Matching(group) => &group.instruction,
            QuestionGroup::SentenceCompletion(group) => &group.instruction,
            QuestionGroup::ShortAnswer(group) => &group.instruction,
            QuestionGroup::SummaryCompletion(group) => &group.instruction,
            QuestionGroup::NoteCompletion(group) => &group.instruction,
            QuestionGroup::TableCompletion(group) => &group.instruction,
            QuestionGroup::FlowChartCompletion(group) => &group.instruction,
            QuestionGroup::DiagramLabelCompletion(group) => &group.instruction,
        }
    }

    /// Response targets in numbering order. Option lists and fixed text are
    /// never part of this sequence.
    pub fn atomic_questions(&self) -> Vec<&dyn AtomicQuestion> {
        fn targets<T: AtomicQuestion>(records: &[T]) -> Vec<&dyn AtomicQuestion> {
            records
                .iter()
                .filter(|record| record.requires_response())
                .map(|record| record as &dyn AtomicQuestion)
                .collect()
        }

        match self {
            QuestionGroup::MultipleChoice(group) => targets(&group.questions),
            QuestionGroup::MultipleChoiceMultipleAnswers(group) => targets(&group.questions),
            QuestionGroup::TrueFalseNotGiven(group) | QuestionGroup::YesNoNotGiven(group) => {
                targets(&group.questions)
            }
            QuestionGroup::MatchingHeadings(group) => targets(&group.questions),
            QuestionGroup::MatchingInformation(group) => targets(&group.questions),
            QuestionGroup::MatchingFeatures(group) => targets(&group.questions),
            QuestionGroup::MatchingSentenceEndings(group) => targets(&group.questions),
            QuestionGroup::Matching(group) => targets(&group.questions),
            QuestionGroup::SentenceCompletion(group) => targets(&group.questions),
            QuestionGroup::ShortAnswer(group) => targets(&group.questions),
            QuestionGroup::SummaryCompletion(group) => targets(&group.gaps),
            QuestionGroup::NoteCompletion(group) => targets(&group.gaps),
            QuestionGroup::TableCompletion(group) => {
                group.rows.iter().flat_map(|row| targets(&row.cells)).collect()
            }
            QuestionGroup::FlowChartCompletion(group) => targets(&group.steps),
            QuestionGroup::DiagramLabelCompletion(group) => targets(&group.labels),
        }
    }

    pub fn question_count(&self) -> usize {
        self.atomic_questions().len()
    }

    pub fn assigned_numbers(&self) -> Vec<u32> {
        self.atomic_questions().into_iter().filter_map(|question| question.number()).collect()
    }
}

/// A group as authored. Anything that does not parse as a [`QuestionGroup`]
/// is kept verbatim so drafts survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthoredGroup {
    Parsed(QuestionGroup),
    Raw(Value),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum GroupDefect {
    NotAnObject,
    MissingQuestionType,
    UnknownQuestionType { question_type: String },
    Malformed { question_type: QuestionType, reason: String },
}

impl AuthoredGroup {
    pub fn parsed(&self) -> Option<&QuestionGroup> {
        match self {
            AuthoredGroup::Parsed(group) => Some(group),
            AuthoredGroup::Raw(_) => None,
        }
    }

    /// Why a raw group was not usable. `None` for parsed groups.
    pub fn defect(&self) -> Option<GroupDefect> {
        let AuthoredGroup::Raw(value) = self else {
            return None;
        };

        let Some(object) = value.as_object() else {
            return Some(GroupDefect::NotAnObject);
        };

        let Some(raw_type) = object.get("questionType").and_then(Value::as_str) else {
            return Some(GroupDefect::MissingQuestionType);
        };

        match QuestionType::parse(raw_type) {
            None => Some(GroupDefect::UnknownQuestionType { question_type: raw_type.to_string() }),
            Some(question_type) => {
                let reason = match serde_json::from_value::<QuestionGroup>(value.clone()) {
                    Err(err) => err.to_string(),
                    Ok(_) => String::from("group parsed only on a second attempt"),
                };
                Some(GroupDefect::Malformed { question_type, reason })
            }
        }
    }
}

impl From<QuestionGroup> for AuthoredGroup {
    fn from(group: QuestionGroup) -> Self {
        AuthoredGroup::Parsed(group)
    }
}
