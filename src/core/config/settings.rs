use std::path::PathBuf;

use super::parsing::{env_optional, env_or_default, parse_environment, parse_flag};
use super::types::{
    ConfigError, InputSettings, ReportSettings, RuntimeSettings, Settings, TelemetrySettings,
};

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let environment = parse_environment(env_optional("IELTS_ENV"));
        let strict_numbering = match env_optional("IELTS_STRICT_NUMBERING") {
            Some(value) => parse_flag("IELTS_STRICT_NUMBERING", value)?,
            None => environment.is_production(),
        };

        let test_definition = env_optional("IELTS_TEST_DEFINITION")
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingValue("IELTS_TEST_DEFINITION"))?;
        let submission = env_optional("IELTS_SUBMISSION").map(PathBuf::from);
        let overrides = env_optional("IELTS_OVERRIDES").map(PathBuf::from);

        let pretty =
            parse_flag("IELTS_REPORT_PRETTY", env_or_default("IELTS_REPORT_PRETTY", "true"))?;

        let log_level = env_or_default("IELTS_LOG_LEVEL", "info");
        let json = parse_flag("IELTS_LOG_JSON", env_or_default("IELTS_LOG_JSON", "false"))?;
        let prometheus_enabled =
            parse_flag("PROMETHEUS_ENABLED", env_or_default("PROMETHEUS_ENABLED", "false"))?;

        let settings = Self {
            runtime: RuntimeSettings { environment, strict_numbering },
            input: InputSettings { test_definition, submission, overrides },
            report: ReportSettings { pretty },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    pub(crate) fn input(&self) -> &InputSettings {
        &self.input
    }

    pub(crate) fn report(&self) -> &ReportSettings {
        &self.report
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.input.overrides.is_some() && self.input.submission.is_none() {
            return Err(ConfigError::MissingDependency {
                field: "IELTS_OVERRIDES",
                requires: "IELTS_SUBMISSION",
            });
        }

        Ok(())
    }
}
