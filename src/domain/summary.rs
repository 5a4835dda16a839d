//! End-of-run accounting.

use serde::Serialize;

use super::item::Item;
use super::outcome::Outcome;

/// Tally of outcomes for a run.
///
/// Counters only ever grow; `success + failed + skipped` equals the number of
/// models that received an outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
    /// The run was aborted by the operator before every model was processed
    pub interrupted: bool,
    pub failed_items: Vec<Item>,
    pub skipped_items: Vec<Item>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the terminal outcome of one model.
    pub fn record(&mut self, item: &Item, outcome: Outcome) {
        if outcome.counts_as_success() {
            self.success += 1;
            return;
        }
        match outcome {
            Outcome::Failed => {
                self.failed += 1;
                self.failed_items.push(item.clone());
            }
            Outcome::Skipped => {
                self.skipped += 1;
                self.skipped_items.push(item.clone());
            }
            Outcome::AlreadyPresent | Outcome::Success => {}
        }
    }

    /// Number of models that received an outcome.
    pub fn processed(&self) -> usize {
        self.success + self.failed + self.skipped
    }
}
