//! Subprocess-backed retrieval: `<program> <pull_args..> <model>`.

use std::process::Stdio;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use super::RetrievalInvoker;
use crate::config::FetchConfig;
use crate::domain::{AttemptResult, Item};

/// Invokes the external pull command for each attempt.
#[derive(Debug, Clone)]
pub struct CommandInvoker {
    program: String,
    args: Vec<String>,
}

impl CommandInvoker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self::new(&config.program, config.pull_args.clone())
    }

    /// The command line that will run for `item`, for logging.
    pub fn command_line(&self, item: &Item) -> String {
        let mut parts = vec![self.program.as_str()];
        parts.extend(self.args.iter().map(String::as_str));
        parts.push(item.name());
        parts.join(" ")
    }
}

#[async_trait]
impl RetrievalInvoker for CommandInvoker {
    async fn fetch(&self, item: &Item) -> AttemptResult {
        debug!("Running: {}", self.command_line(item));

        // kill_on_drop lets an aborted run take the child down with it
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(item.name())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                AttemptResult::Success(String::from_utf8_lossy(&output.stdout).trim().to_string())
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                if stderr.is_empty() {
                    AttemptResult::Failure(format!("exited with status {}", output.status))
                } else {
                    AttemptResult::Failure(stderr)
                }
            }
            Err(e) => AttemptResult::Failure(format!("failed to run {}: {}", self.program, e)),
        }
    }
}
