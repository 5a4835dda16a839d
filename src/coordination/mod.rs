//! Coordination between the orchestrator and the operator.
//!
//! - SkipSignal: per-model skip flag
//! - SkipListener: stdin reader that raises the flag
//! - watch_for_interrupt: whole-run abort on Ctrl+C / SIGTERM

pub mod interrupt;
pub mod listener;
pub mod skip;

pub use interrupt::watch_for_interrupt;
pub use listener::{SkipListener, is_skip_command};
pub use skip::SkipSignal;
