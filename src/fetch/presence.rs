//! Presence checks run before pulling a model.

use std::process::Stdio;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use super::PresenceChecker;
use crate::config::FetchConfig;
use crate::domain::Item;

/// Always answers "not present".
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverPresent;

#[async_trait]
impl PresenceChecker for NeverPresent {
    async fn is_present(&self, _item: &Item) -> bool {
        false
    }
}

/// Looks the model up in the output of `<program> <list_args..>`.
///
/// The first column of every non-header line is taken as a local model name.
/// Anything that goes wrong counts as "not present".
#[derive(Debug, Clone)]
pub struct ListingPresenceChecker {
    program: String,
    args: Vec<String>,
}

impl ListingPresenceChecker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self::new(&config.program, config.list_args.clone())
    }

    async fn listing(&self) -> Option<String> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                Some(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Ok(output) => {
                debug!("Model listing exited with {}", output.status);
                None
            }
            Err(e) => {
                debug!("Model listing could not run: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl PresenceChecker for ListingPresenceChecker {
    async fn is_present(&self, item: &Item) -> bool {
        match self.listing().await {
            Some(listing) => listing_contains(&listing, item.name()),
            None => false,
        }
    }
}

/// Model names from a tabular listing whose header row starts with `NAME`.
pub fn parse_listed_models(listing: &str) -> Vec<&str> {
    listing
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|name| !name.eq_ignore_ascii_case("name"))
        .collect()
}

/// Exact match, where an untagged name also matches its `:latest` tag.
pub fn listing_contains(listing: &str, name: &str) -> bool {
    let latest = (!name.contains(':')).then(|| format!("{}:latest", name));
    parse_listed_models(listing)
        .into_iter()
        .any(|listed| listed == name || latest.as_deref() == Some(listed))
}
