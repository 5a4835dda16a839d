//! CLI definition using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::input::ItemSource;

/// ModelCascade - pull a list of models one after another
#[derive(Parser, Debug)]
#[command(name = "modelcascade")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Model names to pull (prompted for when neither these nor --file are given)
    pub models: Vec<String>,

    /// File with one model name per line
    #[arg(short, long, conflicts_with = "models")]
    pub file: Option<PathBuf>,

    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Attempts per model before giving up
    #[arg(short = 'a', long)]
    pub max_attempts: Option<u32>,

    /// Seconds to wait between attempts
    #[arg(short, long)]
    pub delay_secs: Option<u64>,

    /// Retrieval program to run (default: ollama)
    #[arg(long)]
    pub program: Option<String>,

    /// Pull every model even if it is already present
    #[arg(long)]
    pub no_presence_check: bool,

    /// Also print the final summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Where model names come from for this invocation.
    pub fn item_source(&self) -> ItemSource {
        if !self.models.is_empty() {
            ItemSource::Names(self.models.clone())
        } else if let Some(path) = &self.file {
            ItemSource::File(path.clone())
        } else {
            ItemSource::Interactive
        }
    }

    /// Layer command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(max_attempts) = self.max_attempts {
            config.retry.max_attempts = max_attempts;
        }
        if let Some(delay_secs) = self.delay_secs {
            config.retry.delay_ms = delay_secs.saturating_mul(1000);
        }
        if let Some(program) = &self.program {
            config.fetch.program = program.clone();
        }
        if self.no_presence_check {
            config.fetch.presence_check = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional_models() {
        let cli = Cli::parse_from(["modelcascade", "llama3", "phi3"]);
        assert_eq!(
            cli.item_source(),
            ItemSource::Names(vec!["llama3".to_string(), "phi3".to_string()])
        );
        assert!(!cli.is_verbose());
    }

    #[test]
    fn test_parse_file_source() {
        let cli = Cli::parse_from(["modelcascade", "--file", "models.txt"]);
        assert_eq!(cli.item_source(), ItemSource::File(PathBuf::from("models.txt")));
    }

    #[test]
    fn test_no_source_is_interactive() {
        let cli = Cli::parse_from(["modelcascade"]);
        assert_eq!(cli.item_source(), ItemSource::Interactive);
    }

    #[test]
    fn test_file_conflicts_with_models() {
        assert!(Cli::try_parse_from(["modelcascade", "-f", "x.txt", "llama3"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "modelcascade",
            "-a",
            "3",
            "--delay-secs",
            "2",
            "--program",
            "podman",
            "--no-presence-check",
            "--json",
            "llama3",
        ]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.delay_ms, 2000);
        assert_eq!(config.fetch.program, "podman");
        assert!(!config.fetch.presence_check);
        assert!(cli.json);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let cli = Cli::parse_from(["modelcascade", "llama3"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.retry, Config::default().retry);
        assert!(config.fetch.presence_check);
    }
}
