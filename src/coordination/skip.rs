//! Per-model skip flag shared between the skip listener and the orchestrator.
//!
//! The listener calls `set()` when the operator asks to skip; the orchestrator
//! calls `reset()` before each model and polls `is_set()` before every attempt.
//! `wait()` lets the retry delay be cut short as soon as the flag goes up.

use std::sync::Arc;

use tokio::sync::watch;

/// A resettable, cloneable skip flag.
///
/// Repeated `set()` calls before the next `reset()` collapse into one signal.
#[derive(Debug, Clone)]
pub struct SkipSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl SkipSignal {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(watch::Sender::new(false)),
        }
    }

    /// Raise the flag. Returns true if it was not already raised.
    pub fn set(&self) -> bool {
        !self.tx.send_replace(true)
    }

    /// Lower the flag for the next model.
    pub fn reset(&self) {
        self.tx.send_replace(false);
    }

    pub fn is_set(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once the flag is raised (immediately if it already is).
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close under us.
        let _ = rx.wait_for(|raised| *raised).await;
    }
}

impl Default for SkipSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_starts_lowered() {
        assert!(!SkipSignal::new().is_set());
    }

    #[test]
    fn test_set_and_reset() {
        let signal = SkipSignal::new();
        signal.set();
        assert!(signal.is_set());
        signal.reset();
        assert!(!signal.is_set());
    }

    #[test]
    fn test_repeated_sets_collapse() {
        let signal = SkipSignal::new();
        assert!(signal.set());
        assert!(!signal.set());
        assert!(!signal.set());
        signal.reset();
        assert!(!signal.is_set());
    }

    #[test]
    fn test_clones_share_state() {
        let listener_side = SkipSignal::new();
        let orchestrator_side = listener_side.clone();
        listener_side.set();
        assert!(orchestrator_side.is_set());
        orchestrator_side.reset();
        assert!(!listener_side.is_set());
    }

    #[tokio::test]
    async fn test_wait_returns_immediately_when_set() {
        let signal = SkipSignal::new();
        signal.set();
        tokio::time::timeout(Duration::from_millis(200), signal.wait())
            .await
            .expect("wait should resolve for an already raised flag");
    }

    #[tokio::test]
    async fn test_wait_wakes_on_set_from_other_thread() {
        let signal = SkipSignal::new();
        let remote = signal.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            remote.set();
        });
        tokio::time::timeout(Duration::from_secs(2), signal.wait())
            .await
            .expect("wait should wake after set");
    }

    #[tokio::test]
    async fn test_wait_pends_while_lowered() {
        let signal = SkipSignal::new();
        let result = tokio::time::timeout(Duration::from_millis(30), signal.wait()).await;
        assert!(result.is_err(), "wait must not resolve while the flag is down");
    }
}
