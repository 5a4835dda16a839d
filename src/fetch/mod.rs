//! Collaborators that talk to the retrieval tool.
//!
//! - RetrievalInvoker: one pull attempt for one model
//! - PresenceChecker: best-effort "already pulled?" lookup

pub mod command;
pub mod presence;

use async_trait::async_trait;

use crate::domain::{AttemptResult, Item};

pub use command::CommandInvoker;
pub use presence::{ListingPresenceChecker, NeverPresent};

/// Runs the retrieval tool once for a model.
///
/// Ordinary failure is reported as `AttemptResult::Failure`, never as a panic
/// or error, so the retry loop always gets a value back.
#[async_trait]
pub trait RetrievalInvoker: Send + Sync {
    async fn fetch(&self, item: &Item) -> AttemptResult;
}

/// Reports whether a model is already available locally.
///
/// Must not report false positives; answering `false` when unsure is fine.
#[async_trait]
pub trait PresenceChecker: Send + Sync {
    async fn is_present(&self, item: &Item) -> bool;
}
