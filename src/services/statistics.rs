use std::collections::BTreeMap;

use crate::schemas::stats::{SectionStat, TestStat};

/// Aggregates section stats into test-level totals. Difficulty is counted once
/// per section, not per question.
pub fn summarize(section_stats: &[SectionStat]) -> TestStat {
    let total_sections = section_stats.len() as u32;
    let total_questions: u32 = section_stats.iter().map(|stat| stat.question_count).sum();

    let average_questions_per_section = if total_sections == 0 {
        0
    } else {
        (f64::from(total_questions) / f64::from(total_sections)).round() as u32
    };

    let difficulty_breakdown =
        section_stats.iter().fold(BTreeMap::new(), |mut breakdown, stat| {
            *breakdown.entry(stat.difficulty).or_insert(0) += 1;
            breakdown
        });

    TestStat {
        total_sections,
        total_questions,
        average_questions_per_section,
        difficulty_breakdown,
    }
}
