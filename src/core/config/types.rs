use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(super) runtime: RuntimeSettings,
    pub(super) input: InputSettings,
    pub(super) report: ReportSettings,
    pub(super) telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub(crate) struct RuntimeSettings {
    pub(crate) environment: Environment,
    /// Numbering anomalies fail the run instead of only being reported.
    pub(crate) strict_numbering: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct InputSettings {
    pub(crate) test_definition: PathBuf,
    pub(crate) submission: Option<PathBuf>,
    pub(crate) overrides: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub(crate) struct ReportSettings {
    pub(crate) pretty: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct TelemetrySettings {
    pub(crate) log_level: String,
    pub(crate) json: bool,
    pub(crate) prometheus_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Environment {
    Development,
    Production,
    Staging,
    Test,
}

impl Environment {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Test => "test",
        }
    }

    pub(super) fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("missing required setting {0}")]
    MissingValue(&'static str),
    #[error("{field} requires {requires} to be set")]
    MissingDependency { field: &'static str, requires: &'static str },
}
