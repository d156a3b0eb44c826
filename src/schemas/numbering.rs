use serde::Serialize;

use super::question_group::GroupDefect;
use super::stats::{SectionStat, TestStat};
use super::test::Section;

/// A structural problem found while numbering. Never fatal to the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum NumberingAnomaly {
    SkippedGroup {
        section_number: u32,
        group_index: usize,
        defect: GroupDefect,
    },
    SectionCountMismatch {
        skill: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberingOutcome {
    pub numbered_sections: Vec<Section>,
    pub total_questions: u32,
    pub section_stats: Vec<SectionStat>,
    pub summary: TestStat,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<NumberingAnomaly>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::types::QuestionType;
    use serde_json::json;

    #[test]
    fn anomalies_serialize_with_camel_case_fields() {
        let skipped = NumberingAnomaly::SkippedGroup {
            section_number: 2,
            group_index: 3,
            defect: GroupDefect::Malformed {
                question_type: QuestionType::NoteCompletion,
                reason: String::from("missing field `gaps`"),
            },
        };
        let mismatch = NumberingAnomaly::SectionCountMismatch {
            skill: String::from("listening"),
            expected: 4,
            actual: 3,
        };

        assert_eq!(
            serde_json::to_value(&skipped).expect("encode"),
            json!({
                "kind": "skipped_group",
                "sectionNumber": 2,
                "groupIndex": 3,
                "defect": {
                    "kind": "malformed",
                    "questionType": "note-completion",
                    "reason": "missing field `gaps`"
                }
            })
        );
        assert_eq!(
            serde_json::to_value(&mismatch).expect("encode"),
            json!({
                "kind": "section_count_mismatch",
                "skill": "listening",
                "expected": 4,
                "actual": 3
            })
        );
    }
}
