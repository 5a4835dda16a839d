//! Pull runner module.
//!
//! - RetryPolicy: bounded attempts with a skippable delay
//! - PullOrchestrator: sequential walk over the model list

mod orchestrator;
mod retry;

pub use orchestrator::PullOrchestrator;
pub use retry::{RetryPolicy, WaitResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), RetryPolicy::DEFAULT_MAX_ATTEMPTS);
    }
}
