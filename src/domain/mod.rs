//! Domain types for ModelCascade
//!
//! - Item: a validated model name
//! - AttemptResult / Outcome: per-attempt and per-model results
//! - RunSummary: end-of-run tally

pub mod item;
pub mod outcome;
pub mod summary;

pub use item::{Item, is_valid};
pub use outcome::{AttemptResult, Outcome};
pub use summary::RunSummary;
