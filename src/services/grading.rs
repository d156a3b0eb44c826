use crate::schemas::grading::{
    AnswerProgress, GradableQuestion, GradingReport, OverrideMap, QuestionVerdict,
    SubmittedAnswers,
};
use crate::schemas::question_group::{AuthoredGroup, QuestionGroup};
use crate::schemas::test::Section;
use crate::schemas::types::{GradeVerdict, OverrideStatus};

/// Numbered questions of a group with the canonical answer taken from the
/// field the variant defines. Unnumbered questions are left out.
pub fn gradable_questions(group: &QuestionGroup) -> Vec<GradableQuestion<'_>> {
    let question_type = group.question_type();
    group
        .atomic_questions()
        .into_iter()
        .filter_map(|question| {
            question.number().map(|number| GradableQuestion {
                number,
                question_type,
                canonical_answer: question.canonical_answer(),
            })
        })
        .collect()
}

pub fn auto_verdict(question: &GradableQuestion<'_>, submitted: Option<&str>) -> GradeVerdict {
    let Some(submitted) = submitted.map(str::trim).filter(|value| !value.is_empty()) else {
        return GradeVerdict::Unanswered;
    };

    if answers_match(submitted, question.canonical_answer) {
        GradeVerdict::Correct
    } else {
        GradeVerdict::Incorrect
    }
}

/// A manual `correct`/`incorrect` always wins; `auto` or no entry defers to
/// the computed verdict.
pub fn final_verdict(
    question_number: u32,
    auto_verdict: GradeVerdict,
    overrides: &OverrideMap,
) -> GradeVerdict {
    resolve(auto_verdict, overrides.get(question_number))
}

pub(crate) fn resolve(auto_verdict: GradeVerdict, status: OverrideStatus) -> GradeVerdict {
    match status {
        OverrideStatus::Auto => auto_verdict,
        OverrideStatus::Correct => GradeVerdict::Correct,
        OverrideStatus::Incorrect => GradeVerdict::Incorrect,
    }
}

/// Trimmed, case-insensitive comparison without allocating.
pub fn answers_match(submitted: &str, canonical: &str) -> bool {
    submitted
        .trim()
        .chars()
        .flat_map(char::to_lowercase)
        .eq(canonical.trim().chars().flat_map(char::to_lowercase))
}

/// Grades every numbered question of a numbered test.
pub fn grade_sections(
    sections: &[Section],
    answers: &SubmittedAnswers,
    overrides: &OverrideMap,
) -> GradingReport {
    let mut report = GradingReport::default();

    let groups = sections
        .iter()
        .flat_map(|section| section.question_groups.iter())
        .filter_map(AuthoredGroup::parsed);

    for group in groups {
        for question in gradable_questions(group) {
            let auto = auto_verdict(&question, answers.get(question.number));
            let override_status = overrides.get(question.number);
            let verdict = resolve(auto, override_status);

            match verdict {
                GradeVerdict::Correct => report.correct += 1,
                GradeVerdict::Incorrect => report.incorrect += 1,
                GradeVerdict::Unanswered => report.unanswered += 1,
            }
            if override_status != OverrideStatus::Auto {
                report.overridden += 1;
            }

            report.verdicts.push(QuestionVerdict {
                number: question.number,
                question_type: question.question_type,
                auto_verdict: auto,
                override_status,
                final_verdict: verdict,
            });
        }
    }

    tracing::debug!(
        questions = report.verdicts.len(),
        correct = report.correct,
        incorrect = report.incorrect,
        unanswered = report.unanswered,
        overridden = report.overridden,
        "Grading reconciliation completed"
    );

    report
}

/// "Answered X of Y": non-blank answers for numbers inside `1..=total`.
pub fn answer_progress(answers: &SubmittedAnswers, total_questions: u32) -> AnswerProgress {
    let answered = answers
        .iter()
        .filter(|(number, answer)| {
            (1..=total_questions).contains(number) && !answer.trim().is_empty()
        })
        .count() as u32;

    AnswerProgress { answered, total: total_questions }
}
