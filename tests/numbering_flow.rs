use std::path::PathBuf;

use ielts_engine::schemas::numbering::NumberingAnomaly;
use ielts_engine::schemas::question_group::{AuthoredGroup, GroupDefect, QuestionGroup};
use ielts_engine::schemas::types::{DifficultyLevel, GradeVerdict, QuestionType};
use ielts_engine::services::definition_loader::{
    load_overrides, load_submitted_answers, load_test_definition,
};
use ielts_engine::services::numbering::number_test;
use ielts_engine::services::report::{build_report, ReportError, Submission};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

#[test]
fn academic_reading_fixture_is_numbered_end_to_end() {
    let definition = load_test_definition(&fixture("academic_reading.json")).expect("definition");

    let outcome = number_test(&definition);
    outcome.verify_contiguity().expect("contiguous numbering");

    assert_eq!(outcome.total_questions, 40);
    let ranges: Vec<&str> =
        outcome.section_stats.iter().map(|stat| stat.question_range.as_str()).collect();
    assert_eq!(ranges, vec!["1-13", "14-26", "27-40"]);

    let difficulties: Vec<DifficultyLevel> =
        outcome.section_stats.iter().map(|stat| stat.difficulty).collect();
    assert_eq!(
        difficulties,
        vec![DifficultyLevel::Easy, DifficultyLevel::Medium, DifficultyLevel::Hard]
    );
    assert_eq!(outcome.summary.total_questions, 40);
    assert_eq!(outcome.summary.average_questions_per_section, 13);

    let second = &outcome.section_stats[1];
    assert_eq!(second.question_type_counts.get(&QuestionType::YesNoNotGiven), Some(&3));
    assert_eq!(second.question_type_counts.len(), 6);

    assert_eq!(
        outcome.anomalies,
        vec![NumberingAnomaly::SkippedGroup {
            section_number: 2,
            group_index: 3,
            defect: GroupDefect::UnknownQuestionType {
                question_type: String::from("pie-chart-commentary"),
            },
        }]
    );
    assert!(matches!(outcome.numbered_sections[1].question_groups[3], AuthoredGroup::Raw(_)));
}

#[test]
fn flow_chart_and_gaps_follow_global_numbering() {
    let definition = load_test_definition(&fixture("academic_reading.json")).expect("definition");
    let outcome = number_test(&definition);

    let last_section = &outcome.numbered_sections[2];
    let flow_chart = last_section
        .question_groups
        .iter()
        .filter_map(AuthoredGroup::parsed)
        .find_map(|group| match group {
            QuestionGroup::FlowChartCompletion(flow) => Some(flow),
            _ => None,
        })
        .expect("flow chart group");

    assert_eq!(flow_chart.starting_question_number, Some(36));
    let blanks: Vec<(Option<u32>, Option<&str>)> = flow_chart
        .steps
        .iter()
        .map(|step| (step.number, step.step_id.as_deref()))
        .collect();
    assert_eq!(
        blanks,
        vec![(None, None), (Some(36), Some("36")), (Some(37), Some("37")), (Some(38), Some("38"))]
    );

    let QuestionGroup::SummaryCompletion(summary) =
        outcome.numbered_sections[0].question_groups[3].parsed().expect("summary group")
    else {
        panic!("expected summary completion");
    };
    let gap_ids: Vec<Option<&str>> = summary.gaps.iter().map(|gap| gap.gap_id.as_deref()).collect();
    assert_eq!(gap_ids, vec![Some("11"), Some("12"), Some("13")]);
}

#[test]
fn submission_is_graded_with_overrides() {
    let definition = load_test_definition(&fixture("academic_reading.json")).expect("definition");
    let answers = load_submitted_answers(&fixture("submission.json")).expect("answers");
    let overrides = load_overrides(&fixture("overrides.json")).expect("overrides");

    let report = build_report(
        &definition,
        Some(Submission { answers: &answers, overrides: &overrides }),
        false,
    )
    .expect("report");

    let progress = report.progress.expect("progress");
    assert_eq!((progress.answered, progress.total), (7, 40));

    let grading = report.grading.expect("grading");
    assert_eq!(grading.verdicts.len(), 40);
    assert_eq!((grading.correct, grading.incorrect, grading.unanswered), (6, 1, 33));
    assert_eq!(grading.overridden, 2);

    let verdict = |number: u32| {
        grading.verdicts.iter().find(|verdict| verdict.number == number).expect("verdict")
    };
    assert_eq!(verdict(2).final_verdict, GradeVerdict::Correct);
    assert_eq!(verdict(20).auto_verdict, GradeVerdict::Unanswered);
    assert_eq!(verdict(27).auto_verdict, GradeVerdict::Correct);
    assert_eq!(verdict(27).final_verdict, GradeVerdict::Incorrect);
    assert_eq!(verdict(39).auto_verdict, GradeVerdict::Incorrect);
    assert_eq!(verdict(39).final_verdict, GradeVerdict::Correct);
    assert_eq!(verdict(40).question_type, QuestionType::DiagramLabelCompletion);
}

#[test]
fn strict_numbering_refuses_unknown_groups() {
    let definition = load_test_definition(&fixture("academic_reading.json")).expect("definition");

    let err = build_report(&definition, None, true).expect_err("strict run");
    assert!(matches!(err, ReportError::StrictNumbering { count: 1 }));
}

#[test]
fn report_serializes_with_camel_case_fields() {
    let definition = load_test_definition(&fixture("academic_reading.json")).expect("definition");
    let report = build_report(&definition, None, false).expect("report");

    let value = serde_json::to_value(&report).expect("json");

    assert_eq!(value["testTitle"], "Academic Reading Practice Test 1");
    assert_eq!(value["numbering"]["totalQuestions"], 40);
    assert_eq!(value["numbering"]["sectionStats"][2]["questionRange"], "27-40");
    assert_eq!(value["numbering"]["anomalies"][0]["kind"], "skipped_group");
    assert_eq!(value["numbering"]["anomalies"][0]["groupIndex"], 3);
    assert_eq!(
        value["numbering"]["anomalies"][0]["defect"]["questionType"],
        "pie-chart-commentary"
    );
    assert!(value.get("grading").is_none());
    assert!(value["generatedAt"].as_str().is_some());
}
