use std::sync::{Mutex, MutexGuard, OnceLock};

use serde_json::Map;

use crate::schemas::question_group::{
    AuthoredGroup, ChoiceQuestion, FlowChartGroup, FlowStep, Gap, MultipleChoiceGroup,
    NoteCompletionGroup, QuestionGroup, StatementGroup, StatementQuestion, TableCell,
    TableCompletionGroup, TableRow,
};
use crate::schemas::test::{ReadingPassage, Section, SectionResource, TestDefinition};
use crate::schemas::types::{DifficultyLevel, TestSkill};

const DIFFICULTY_CYCLE: [DifficultyLevel; 3] =
    [DifficultyLevel::Easy, DifficultyLevel::Medium, DifficultyLevel::Hard];

pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) fn reading_section(
    title: &str,
    difficulty: DifficultyLevel,
    groups: Vec<AuthoredGroup>,
) -> Section {
    Section {
        resource: SectionResource::ReadingPassage(ReadingPassage {
            title: title.to_string(),
            difficulty,
            content: String::from("Lorem ipsum"),
        }),
        question_groups: groups,
    }
}

/// Reading test whose sections hold the given numbers of questions, split
/// between a multiple-choice group and a true/false/not-given group.
pub(crate) fn reading_test(questions_per_section: &[u32]) -> TestDefinition {
    let sections = questions_per_section
        .iter()
        .enumerate()
        .map(|(index, &count)| {
            let choices = count / 2;
            reading_section(
                &format!("Passage {}", index + 1),
                DIFFICULTY_CYCLE[index % DIFFICULTY_CYCLE.len()],
                vec![multiple_choice_group(choices), statement_group(count - choices)],
            )
        })
        .collect();

    TestDefinition {
        id: Some(String::from("reading-fixture")),
        title: String::from("Academic Reading Fixture"),
        skill: TestSkill::Reading,
        sections,
    }
}

pub(crate) fn multiple_choice_group(count: u32) -> AuthoredGroup {
    let questions = (0..count)
        .map(|index| ChoiceQuestion {
            number: None,
            question: format!("Question {index}"),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: String::from("A"),
            extra: Map::new(),
        })
        .collect();

    QuestionGroup::MultipleChoice(MultipleChoiceGroup {
        instruction: String::from("Choose the correct letter, A, B, C or D."),
        questions,
        extra: Map::new(),
    })
    .into()
}

pub(crate) fn statement_group(count: u32) -> AuthoredGroup {
    let questions = (0..count)
        .map(|index| StatementQuestion {
            number: None,
            statement: format!("Statement {index}"),
            answer: String::from("TRUE"),
            extra: Map::new(),
        })
        .collect();

    QuestionGroup::TrueFalseNotGiven(StatementGroup {
        instruction: String::from("Do the following statements agree with the passage?"),
        questions,
        extra: Map::new(),
    })
    .into()
}

pub(crate) fn note_completion_group(count: u32) -> AuthoredGroup {
    let gaps = (0..count)
        .map(|index| Gap {
            number: None,
            gap_id: None,
            context: format!("Note {index}: ___"),
            answer: format!("word{index}"),
            extra: Map::new(),
        })
        .collect();

    QuestionGroup::NoteCompletion(NoteCompletionGroup {
        instruction: String::from("Complete the notes below."),
        title: Some(String::from("Notes")),
        gaps,
        extra: Map::new(),
    })
    .into()
}

/// Two rows with one blank each: answers "June" then "concert".
pub(crate) fn table_group() -> AuthoredGroup {
    let text = |value: &str| TableCell {
        number: None,
        cell_id: None,
        text: value.to_string(),
        answer: None,
        extra: Map::new(),
    };
    let blank = |answer: &str| TableCell {
        number: None,
        cell_id: None,
        text: String::new(),
        answer: Some(answer.to_string()),
        extra: Map::new(),
    };

    QuestionGroup::TableCompletion(TableCompletionGroup {
        instruction: String::from("Complete the table below."),
        columns: vec!["Event".into(), "Detail".into()],
        rows: vec![
            TableRow { cells: vec![text("Opening"), blank("June")], extra: Map::new() },
            TableRow { cells: vec![blank("concert"), text("July")], extra: Map::new() },
        ],
        extra: Map::new(),
    })
    .into()
}

/// Four steps, the second and fourth blank: answers "heat" then "filter".
pub(crate) fn flow_chart_group() -> AuthoredGroup {
    let step = |text: &str, answer: Option<&str>| FlowStep {
        number: None,
        step_id: None,
        text: text.to_string(),
        answer: answer.map(str::to_string),
        extra: Map::new(),
    };

    QuestionGroup::FlowChartCompletion(FlowChartGroup {
        instruction: String::from("Complete the flow-chart below."),
        title: None,
        starting_question_number: None,
        steps: vec![
            step("Collect samples", None),
            step("Apply ___", Some("heat")),
            step("Wait ten minutes", None),
            step("Pass through a ___", Some("filter")),
        ],
        extra: Map::new(),
    })
    .into()
}
