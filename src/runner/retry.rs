//! Bounded retry with a fixed, skippable delay.
//!
//! One model moves through a small state machine:
//!
//! ```text
//! Attempting(n) --success--------------------------> Done(Success)
//! Attempting(n) --failure, n == max----------------> Done(Failed)
//! Attempting(n) --failure, n <  max----------------> Waiting(n)
//! Waiting(n)    --delay elapsed--------------------> Attempting(n + 1)
//! Attempting/Waiting --skip flag raised------------> Done(Skipped)
//! ```
//!
//! The skip flag is checked before every attempt and watched during the
//! delay. An attempt already running is allowed to finish.

use std::time::Duration;

use log::{debug, error, info, warn};

use crate::config::RetryConfig;
use crate::coordination::SkipSignal;
use crate::domain::{AttemptResult, Item, Outcome};
use crate::error::{CascadeError, Result};
use crate::fetch::RetrievalInvoker;
use crate::report::Reporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetryState {
    Attempting(u32),
    Waiting(u32),
    Done(Outcome),
}

/// How the retry delay ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitResult {
    Elapsed,
    Skipped,
}

/// Retry settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

    /// `max_attempts` must be at least 1.
    pub fn new(max_attempts: u32, delay: Duration) -> Result<Self> {
        if max_attempts == 0 {
            return Err(CascadeError::InvalidConfig(
                "max attempts must be at least 1".to_string(),
            ));
        }
        Ok(Self { max_attempts, delay })
    }

    pub fn from_config(config: &RetryConfig) -> Result<Self> {
        Self::new(config.max_attempts, config.delay())
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Pull `item` until it succeeds, runs out of attempts, or is skipped.
    pub async fn attempt_with_retry<I>(
        &self,
        item: &Item,
        invoker: &I,
        skip: &SkipSignal,
        reporter: &dyn Reporter,
    ) -> Outcome
    where
        I: RetrievalInvoker + ?Sized,
    {
        let mut state = RetryState::Attempting(1);

        loop {
            state = match state {
                RetryState::Attempting(attempt) => {
                    if skip.is_set() {
                        RetryState::Done(Outcome::Skipped)
                    } else {
                        self.attempt(item, attempt, invoker, reporter).await
                    }
                }
                RetryState::Waiting(attempt) => match self.wait(skip).await {
                    WaitResult::Elapsed => RetryState::Attempting(attempt + 1),
                    WaitResult::Skipped => RetryState::Done(Outcome::Skipped),
                },
                RetryState::Done(outcome) => {
                    match outcome {
                        Outcome::Skipped => warn!("Skipping model: {} (user request)", item),
                        Outcome::Failed => error!(
                            "Failed to pull model {} after {} attempts",
                            item, self.max_attempts
                        ),
                        Outcome::Success | Outcome::AlreadyPresent => {}
                    }
                    return outcome;
                }
            };
        }
    }

    async fn attempt<I>(
        &self,
        item: &Item,
        attempt: u32,
        invoker: &I,
        reporter: &dyn Reporter,
    ) -> RetryState
    where
        I: RetrievalInvoker + ?Sized,
    {
        info!("Pulling model: {} (Attempt {}/{})", item, attempt, self.max_attempts);
        reporter.attempt(item, attempt, self.max_attempts);

        match invoker.fetch(item).await {
            AttemptResult::Success(output) => {
                info!("Successfully pulled model: {}", item);
                if !output.is_empty() {
                    debug!("{}", output);
                }
                RetryState::Done(Outcome::Success)
            }
            AttemptResult::Failure(err) => {
                warn!("Error pulling model {} (attempt {}): {}", item, attempt, err);
                if attempt >= self.max_attempts {
                    RetryState::Done(Outcome::Failed)
                } else {
                    info!("Retrying in {:?}...", self.delay);
                    RetryState::Waiting(attempt)
                }
            }
        }
    }

    /// Sleep for the retry delay, ending early if the skip flag goes up.
    pub async fn wait(&self, skip: &SkipSignal) -> WaitResult {
        if self.delay.is_zero() {
            return WaitResult::Elapsed;
        }
        tokio::select! {
            biased;
            _ = skip.wait() => WaitResult::Skipped,
            _ = tokio::time::sleep(self.delay) => WaitResult::Elapsed,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            delay: Self::DEFAULT_DELAY,
        }
    }
}
