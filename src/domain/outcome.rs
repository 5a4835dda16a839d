//! Attempt and per-model outcome types.
//!
//! `AttemptResult` is what one invocation of the retrieval tool produced.
//! `Outcome` is the terminal classification of a model for the whole run.

use serde::Serialize;

/// Result of a single retrieval attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    /// The tool exited successfully; carries captured stdout
    Success(String),
    /// The tool failed or could not be started; carries error text
    Failure(String),
}

/// Terminal outcome of one model in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Found locally, no pull attempted
    AlreadyPresent,
    /// Pulled successfully
    Success,
    /// Every attempt failed
    Failed,
    /// Operator asked to skip it
    Skipped,
}

impl Outcome {
    /// AlreadyPresent is tallied together with Success.
    pub fn counts_as_success(&self) -> bool {
        matches!(self, Outcome::AlreadyPresent | Outcome::Success)
    }
}
