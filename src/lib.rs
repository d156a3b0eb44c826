pub(crate) mod core;
pub mod schemas;
pub mod services;

#[cfg(test)]
mod test_support;

use anyhow::Context;

use crate::core::{config::Settings, telemetry};
use crate::services::definition_loader::{
    load_overrides, load_submitted_answers, load_test_definition,
};
use crate::services::report::{build_report, Submission};

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(settings.telemetry())?;
    core::metrics::init(settings.telemetry())?;

    tracing::info!(
        environment = settings.runtime().environment.as_str(),
        strict_numbering = settings.runtime().strict_numbering,
        "IELTS engine starting"
    );

    let input = settings.input();
    let definition = load_test_definition(&input.test_definition)
        .context("failed to load test definition")?;

    let answers = input
        .submission
        .as_deref()
        .map(load_submitted_answers)
        .transpose()
        .context("failed to load submitted answers")?;
    let overrides = input
        .overrides
        .as_deref()
        .map(load_overrides)
        .transpose()
        .context("failed to load overrides")?
        .unwrap_or_default();

    let submission =
        answers.as_ref().map(|answers| Submission { answers, overrides: &overrides });
    let report = build_report(&definition, submission, settings.runtime().strict_numbering)?;

    let rendered = if settings.report().pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{rendered}");

    tracing::info!(
        total_questions = report.numbering.total_questions,
        anomalies = report.numbering.anomalies.len(),
        graded = report.grading.is_some(),
        "IELTS engine run completed"
    );

    if let Some(metrics) = core::metrics::render() {
        tracing::debug!(%metrics, "Metrics snapshot");
    }

    Ok(())
}
