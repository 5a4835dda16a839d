//! Pull orchestrator - walks the model list one model at a time.
//!
//! For each model, in input order:
//! 1. Lower the skip flag
//! 2. Ask the presence checker; a hit is recorded as AlreadyPresent
//! 3. Otherwise hand the model to the retry policy
//! 4. Record the outcome and report progress
//!
//! A whole-run interrupt stops the walk and returns the partial summary.

use std::sync::Arc;

use log::info;
use tokio_util::sync::CancellationToken;

use super::retry::RetryPolicy;
use crate::coordination::SkipSignal;
use crate::domain::{Item, Outcome, RunSummary};
use crate::error::{CascadeError, Result};
use crate::fetch::{PresenceChecker, RetrievalInvoker};
use crate::report::{Reporter, SilentReporter};

pub struct PullOrchestrator<I, P>
where
    I: RetrievalInvoker,
    P: PresenceChecker,
{
    invoker: Arc<I>,
    presence: Arc<P>,
    policy: RetryPolicy,
    skip: SkipSignal,
    reporter: Arc<dyn Reporter>,
    interrupt: CancellationToken,
}

impl<I, P> PullOrchestrator<I, P>
where
    I: RetrievalInvoker,
    P: PresenceChecker,
{
    pub fn new(invoker: Arc<I>, presence: Arc<P>, policy: RetryPolicy) -> Self {
        Self {
            invoker,
            presence,
            policy,
            skip: SkipSignal::new(),
            reporter: Arc::new(SilentReporter),
            interrupt: CancellationToken::new(),
        }
    }

    /// Share a skip flag with a listener.
    pub fn with_skip_signal(mut self, skip: SkipSignal) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Token whose cancellation aborts the whole run.
    pub fn with_interrupt(mut self, interrupt: CancellationToken) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn skip_signal(&self) -> &SkipSignal {
        &self.skip
    }

    /// Process every model in order and return the tally.
    ///
    /// Fails only when `items` is empty. An interrupt ends the run early with
    /// `interrupted` set; the model in flight at that moment gets no outcome.
    pub async fn run(&self, items: &[Item]) -> Result<RunSummary> {
        if items.is_empty() {
            return Err(CascadeError::NoItems);
        }

        let total = items.len();
        let mut summary = RunSummary::new();
        info!("Starting pull of {} models", total);

        for (index, item) in items.iter().enumerate() {
            if self.interrupt.is_cancelled() {
                summary.interrupted = true;
                break;
            }

            self.reporter.item_started(index + 1, total, item);

            let outcome = tokio::select! {
                biased;
                _ = self.interrupt.cancelled() => None,
                outcome = self.process_item(item) => Some(outcome),
            };

            let Some(outcome) = outcome else {
                info!("Run interrupted while processing {}", item);
                summary.interrupted = true;
                break;
            };

            summary.record(item, outcome);
            self.reporter.outcome(item, outcome);
        }

        info!(
            "Run finished: {} succeeded, {} failed, {} skipped{}",
            summary.success,
            summary.failed,
            summary.skipped,
            if summary.interrupted { " (interrupted)" } else { "" }
        );
        Ok(summary)
    }

    /// Produce the outcome for a single model.
    pub async fn process_item(&self, item: &Item) -> Outcome {
        self.skip.reset();

        if self.presence.is_present(item).await {
            info!("Model {} is already pulled. Skipping.", item);
            return Outcome::AlreadyPresent;
        }

        self.policy
            .attempt_with_retry(item, self.invoker.as_ref(), &self.skip, self.reporter.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AttemptResult;
    use crate::fetch::NeverPresent;
    use crate::report::tests::RecordingReporter;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Succeeds for names listed in `good`, fails otherwise; logs every call.
    struct MockInvoker {
        good: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl MockInvoker {
        fn new(good: &[&str]) -> Self {
            Self {
                good: good.iter().map(|s| s.to_string()).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RetrievalInvoker for MockInvoker {
        async fn fetch(&self, item: &Item) -> AttemptResult {
            self.calls.lock().unwrap().push(item.to_string());
            if self.good.contains(item.name()) {
                AttemptResult::Success(String::new())
            } else {
                AttemptResult::Failure("not found".to_string())
            }
        }
    }

    struct PresentSet(HashSet<String>);

    #[async_trait]
    impl PresenceChecker for PresentSet {
        async fn is_present(&self, item: &Item) -> bool {
            self.0.contains(item.name())
        }
    }

    fn items(names: &[&str]) -> Vec<Item> {
        names.iter().map(|n| Item::parse(n).unwrap()).collect()
    }

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO).unwrap()
    }

    #[tokio::test]
    async fn test_empty_list_rejected() {
        let invoker = Arc::new(MockInvoker::new(&[]));
        let orchestrator = PullOrchestrator::new(invoker.clone(), Arc::new(NeverPresent), policy(3));
        assert!(matches!(orchestrator.run(&[]).await, Err(CascadeError::NoItems)));
        assert!(invoker.calls().is_empty());
    }

    #[tokio::test]
    async fn test_mixed_outcomes_are_tallied_in_order() {
        let invoker = Arc::new(MockInvoker::new(&["a", "c"]));
        let reporter = Arc::new(RecordingReporter::default());
        let orchestrator = PullOrchestrator::new(invoker.clone(), Arc::new(NeverPresent), policy(2))
            .with_reporter(reporter.clone());

        let summary = orchestrator.run(&items(&["a", "b", "c"])).await.unwrap();

        assert_eq!(summary.success, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.processed(), 3);
        assert_eq!(summary.failed_items, items(&["b"]));
        assert_eq!(invoker.calls(), vec!["a", "b", "b", "c"]);

        let events = reporter.events();
        assert_eq!(events[0], "start 1/3 a");
        assert!(events.contains(&"outcome b Failed".to_string()));
        assert_eq!(events.last().unwrap(), "outcome c Success");
    }

    #[tokio::test]
    async fn test_present_items_are_not_pulled() {
        let invoker = Arc::new(MockInvoker::new(&["b"]));
        let present = Arc::new(PresentSet(["a".to_string()].into_iter().collect()));
        let orchestrator = PullOrchestrator::new(invoker.clone(), present, policy(3));

        let summary = orchestrator.run(&items(&["a", "b"])).await.unwrap();

        assert_eq!(summary.success, 2);
        assert_eq!(invoker.calls(), vec!["b"]);
    }

    #[tokio::test]
    async fn test_process_item_resets_skip_flag() {
        let invoker = Arc::new(MockInvoker::new(&["a"]));
        let orchestrator = PullOrchestrator::new(invoker.clone(), Arc::new(NeverPresent), policy(1));

        orchestrator.skip_signal().set();
        let outcome = orchestrator.process_item(&items(&["a"])[0]).await;

        assert_eq!(outcome, Outcome::Success);
        assert!(!orchestrator.skip_signal().is_set());
    }

    #[tokio::test]
    async fn test_cancelled_before_start_processes_nothing() {
        let invoker = Arc::new(MockInvoker::new(&["a"]));
        let token = CancellationToken::new();
        token.cancel();
        let orchestrator = PullOrchestrator::new(invoker.clone(), Arc::new(NeverPresent), policy(1))
            .with_interrupt(token);

        let summary = orchestrator.run(&items(&["a", "b"])).await.unwrap();

        assert!(summary.interrupted);
        assert_eq!(summary.processed(), 0);
        assert!(invoker.calls().is_empty());
    }
}
