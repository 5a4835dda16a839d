//! Background listener turning operator input into skip requests.
//!
//! One listener lives for the whole run on a detached OS thread. It only ever
//! touches the [`SkipSignal`]; it never waits on the orchestrator, and the
//! orchestrator never waits on it.

use std::io::BufRead;
use std::sync::Arc;
use std::thread;

use log::{debug, warn};

use super::skip::SkipSignal;
use crate::report::Reporter;

/// Reads lines and raises the skip flag on the configured key.
pub struct SkipListener {
    signal: SkipSignal,
    key: String,
    reporter: Arc<dyn Reporter>,
}

impl SkipListener {
    pub fn new(signal: SkipSignal, key: impl Into<String>, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            signal,
            key: key.into(),
            reporter,
        }
    }

    /// Consume lines until EOF or a read error.
    pub fn listen<R: BufRead>(&self, reader: R) {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    debug!("Skip listener stopped reading input: {}", e);
                    return;
                }
            };
            if is_skip_command(&line, &self.key) && self.signal.set() {
                warn!("Skip requested by operator");
                self.reporter.skip_requested();
            }
        }
        debug!("Skip listener reached end of input");
    }

    /// Listen on stdin from a detached thread.
    ///
    /// The handle is returned for completeness; callers drop it. A thread
    /// blocked on stdin must not hold up process exit, which rules out
    /// `spawn_blocking` on the runtime.
    pub fn spawn(self) -> std::io::Result<thread::JoinHandle<()>> {
        thread::Builder::new()
            .name("skip-listener".to_string())
            .spawn(move || {
                let stdin = std::io::stdin();
                self.listen(stdin.lock());
            })
    }
}

/// A line is a skip command when it equals the key, ignoring case and padding.
pub fn is_skip_command(line: &str, key: &str) -> bool {
    line.trim().eq_ignore_ascii_case(key.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::RecordingReporter;
    use std::io::Cursor;

    #[test]
    fn test_is_skip_command() {
        assert!(is_skip_command("s", "s"));
        assert!(is_skip_command("  S \n", "s"));
        assert!(!is_skip_command("skip", "s"));
        assert!(!is_skip_command("", "s"));
        assert!(is_skip_command("next", "NEXT"));
    }

    #[test]
    fn test_listen_sets_signal_on_key() {
        let signal = SkipSignal::new();
        let reporter = Arc::new(RecordingReporter::default());
        let listener = SkipListener::new(signal.clone(), "s", reporter.clone());

        listener.listen(Cursor::new("hello\ns\n"));

        assert!(signal.is_set());
        assert_eq!(reporter.events(), vec!["skip_requested".to_string()]);
    }

    #[test]
    fn test_listen_ignores_other_input() {
        let signal = SkipSignal::new();
        let reporter = Arc::new(RecordingReporter::default());
        let listener = SkipListener::new(signal.clone(), "s", reporter.clone());

        listener.listen(Cursor::new("x\nskip\n\n"));

        assert!(!signal.is_set());
        assert!(reporter.events().is_empty());
    }

    #[test]
    fn test_repeated_keys_notify_once_until_reset() {
        let signal = SkipSignal::new();
        let reporter = Arc::new(RecordingReporter::default());
        let listener = SkipListener::new(signal.clone(), "s", reporter.clone());

        listener.listen(Cursor::new("s\ns\ns\n"));

        assert!(signal.is_set());
        assert_eq!(reporter.events().len(), 1);
    }
}
