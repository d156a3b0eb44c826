use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::schemas::grading::{OverrideMap, SetOverrideRequest};
use crate::schemas::types::{GradeVerdict, OverrideStatus};
use crate::services::grading::resolve;

#[derive(Debug, Error)]
pub enum GradingError {
    #[error("invalid override request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),
}

/// Overrides made by one instructor while grading one submission.
///
/// Every transition between `auto`, `correct` and `incorrect` is allowed and
/// none is terminal; persisting the map is up to the caller.
#[derive(Debug, Clone)]
pub struct GradingSession {
    id: Uuid,
    overrides: OverrideMap,
}

impl GradingSession {
    pub fn new() -> Self {
        Self::with_overrides(OverrideMap::new())
    }

    /// Resumes a session from a previously saved override map.
    pub fn with_overrides(overrides: OverrideMap) -> Self {
        Self { id: Uuid::new_v4(), overrides }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn overrides(&self) -> &OverrideMap {
        &self.overrides
    }

    pub fn into_overrides(self) -> OverrideMap {
        self.overrides
    }

    pub fn override_for(&self, question_number: u32) -> OverrideStatus {
        self.overrides.get(question_number)
    }

    pub fn set_override(&mut self, question_number: u32, status: OverrideStatus) -> OverrideStatus {
        let previous = self.overrides.set(question_number, status);
        if previous != status {
            tracing::info!(
                session_id = %self.id,
                question_number,
                from = previous.as_str(),
                to = status.as_str(),
                "Grading override changed"
            );
            metrics::counter!("grading_overrides_total", "status" => status.as_str())
                .increment(1);
        }
        previous
    }

    pub fn apply(&mut self, request: SetOverrideRequest) -> Result<OverrideStatus, GradingError> {
        request.validate()?;
        Ok(self.set_override(request.question_number, request.status))
    }

    pub fn final_verdict(&self, question_number: u32, auto_verdict: GradeVerdict) -> GradeVerdict {
        resolve(auto_verdict, self.overrides.get(question_number))
    }
}

impl Default for GradingSession {
    fn default() -> Self {
        Self::new()
    }
}
