use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{DifficultyLevel, QuestionType};

/// Per-section numbering statistics. Derived only; recomputed on every pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStat {
    pub section_number: u32,
    pub title: String,
    pub difficulty: DifficultyLevel,
    pub question_count: u32,
    /// `"<first>-<last>"`, empty when the section numbered nothing.
    pub question_range: String,
    pub first_question: Option<u32>,
    pub last_question: Option<u32>,
    pub question_type_counts: BTreeMap<QuestionType, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStat {
    pub total_sections: u32,
    pub total_questions: u32,
    pub average_questions_per_section: u32,
    pub difficulty_breakdown: BTreeMap<DifficultyLevel, u32>,
}

pub(crate) fn format_question_range(first: Option<u32>, last: Option<u32>) -> String {
    match (first, last) {
        (Some(first), Some(last)) => format!("{first}-{last}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_range_formats_endpoints() {
        assert_eq!(format_question_range(Some(14), Some(26)), "14-26");
        assert_eq!(format_question_range(Some(5), Some(5)), "5-5");
        assert_eq!(format_question_range(None, None), "");
    }

    #[test]
    fn stats_serialize_with_camel_case_keys() {
        let mut breakdown = BTreeMap::new();
        breakdown.insert(DifficultyLevel::Hard, 2);
        let stat = TestStat {
            total_sections: 2,
            total_questions: 27,
            average_questions_per_section: 14,
            difficulty_breakdown: breakdown,
        };

        let encoded = serde_json::to_value(&stat).expect("encode");
        assert_eq!(encoded["averageQuestionsPerSection"], 14);
        assert_eq!(encoded["difficultyBreakdown"]["hard"], 2);
    }
}
