//! Presentation sink for run progress.
//!
//! The orchestrator only talks to the [`Reporter`] trait. Every method is a
//! short write and must never block the run.

mod console;

pub use console::ConsoleReporter;

use crate::domain::{Item, Outcome, RunSummary};

/// Receives progress events from a run.
pub trait Reporter: Send + Sync {
    /// Greeting shown once before input is collected.
    fn banner(&self) {}

    /// Shown once when pulling starts.
    fn pulling_started(&self, _total: usize, _skip_key: &str) {}

    /// A model is about to be processed (`index` is 1-based).
    fn item_started(&self, index: usize, total: usize, item: &Item);

    /// A pull attempt is about to run.
    fn attempt(&self, item: &Item, attempt: u32, max_attempts: u32);

    /// A model received its terminal outcome.
    fn outcome(&self, item: &Item, outcome: Outcome);

    /// The operator asked to skip the current model.
    fn skip_requested(&self) {}

    /// Final tally.
    fn summary(&self, summary: &RunSummary);
}

/// Reporter that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn item_started(&self, _index: usize, _total: usize, _item: &Item) {}
    fn attempt(&self, _item: &Item, _attempt: u32, _max_attempts: u32) {}
    fn outcome(&self, _item: &Item, _outcome: Outcome) {}
    fn summary(&self, _summary: &RunSummary) {}
}
