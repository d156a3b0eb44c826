use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::Validate;

use crate::schemas::grading::{OverrideMap, SubmittedAnswers};
use crate::schemas::test::TestDefinition;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} has invalid format: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("test definition is invalid: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

pub fn load_test_definition(path: &Path) -> Result<TestDefinition, LoadError> {
    let definition: TestDefinition = read_json(path)?;
    definition.validate()?;

    tracing::info!(
        path = %path.display(),
        title = %definition.title,
        skill = definition.skill.as_str(),
        sections = definition.sections.len(),
        "Test definition loaded"
    );

    Ok(definition)
}

/// Parses a definition that is already in memory, e.g. from an authoring draft.
pub fn parse_test_definition(raw: &str) -> Result<TestDefinition, LoadError> {
    let definition: TestDefinition = serde_json::from_str(raw)
        .map_err(|source| LoadError::Parse { path: PathBuf::from("<inline>"), source })?;
    definition.validate()?;
    Ok(definition)
}

pub fn load_submitted_answers(path: &Path) -> Result<SubmittedAnswers, LoadError> {
    read_json(path)
}

pub fn load_overrides(path: &Path) -> Result<OverrideMap, LoadError> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| LoadError::Read { path: path.to_path_buf(), source })?;
    serde_json::from_str(&raw).map_err(|source| LoadError::Parse { path: path.to_path_buf(), source })
}
