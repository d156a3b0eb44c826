use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    MultipleChoiceMultipleAnswers,
    TrueFalseNotGiven,
    YesNoNotGiven,
    MatchingHeadings,
    MatchingInformation,
    MatchingFeatures,
    MatchingSentenceEndings,
    Matching,
    SentenceCompletion,
    ShortAnswer,
    SummaryCompletion,
    NoteCompletion,
    TableCompletion,
    FlowChartCompletion,
    DiagramLabelCompletion,
}

impl QuestionType {
    pub const ALL: [QuestionType; 16] = [
        QuestionType::MultipleChoice,
        QuestionType::MultipleChoiceMultipleAnswers,
        QuestionType::TrueFalseNotGiven,
        QuestionType::YesNoNotGiven,
        QuestionType::MatchingHeadings,
        QuestionType::MatchingInformation,
        QuestionType::MatchingFeatures,
        QuestionType::MatchingSentenceEndings,
        QuestionType::Matching,
        QuestionType::SentenceCompletion,
        QuestionType::ShortAnswer,
        QuestionType::SummaryCompletion,
        QuestionType::NoteCompletion,
        QuestionType::TableCompletion,
        QuestionType::FlowChartCompletion,
        QuestionType::DiagramLabelCompletion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::MultipleChoiceMultipleAnswers => "multiple-choice-multiple-answers",
            QuestionType::TrueFalseNotGiven => "true-false-not-given",
            QuestionType::YesNoNotGiven => "yes-no-not-given",
            QuestionType::MatchingHeadings => "matching-headings",
            QuestionType::MatchingInformation => "matching-information",
            QuestionType::MatchingFeatures => "matching-features",
            QuestionType::MatchingSentenceEndings => "matching-sentence-endings",
            QuestionType::Matching => "matching",
            QuestionType::SentenceCompletion => "sentence-completion",
            QuestionType::ShortAnswer => "short-answer",
            QuestionType::SummaryCompletion => "summary-completion",
            QuestionType::NoteCompletion => "note-completion",
            QuestionType::TableCompletion => "table-completion",
            QuestionType::FlowChartCompletion => "flow-chart-completion",
            QuestionType::DiagramLabelCompletion => "diagram-label-completion",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestSkill {
    Reading,
    Listening,
}

impl TestSkill {
    pub fn expected_sections(self) -> usize {
        match self {
            TestSkill::Reading => 3,
            TestSkill::Listening => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TestSkill::Reading => "reading",
            TestSkill::Listening => "listening",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeVerdict {
    Correct,
    Incorrect,
    Unanswered,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideStatus {
    #[default]
    Auto,
    Correct,
    Incorrect,
}

impl OverrideStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OverrideStatus::Auto => "auto",
            OverrideStatus::Correct => "correct",
            OverrideStatus::Incorrect => "incorrect",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_wire_names_match_as_str() {
        for kind in QuestionType::ALL {
            let encoded = serde_json::to_value(kind).expect("encode");
            assert_eq!(encoded, serde_json::Value::String(kind.as_str().to_string()));
            assert_eq!(QuestionType::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn question_type_parse_rejects_unknown() {
        assert_eq!(QuestionType::parse("speaking-part-2"), None);
        assert_eq!(QuestionType::parse(""), None);
    }

    #[test]
    fn skill_expected_sections() {
        assert_eq!(TestSkill::Reading.expected_sections(), 3);
        assert_eq!(TestSkill::Listening.expected_sections(), 4);
    }

    #[test]
    fn override_status_defaults_to_auto() {
        assert_eq!(OverrideStatus::default(), OverrideStatus::Auto);
    }
}
