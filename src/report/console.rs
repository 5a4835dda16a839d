//! Colored terminal output with a progress bar.

use std::sync::Mutex;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use super::Reporter;
use crate::domain::{Item, Outcome, RunSummary};

const BANNER: &str = r"
  __  __           _      _  _____                        _
 |  \/  |         | |    | |/ ____|                      | |
 | \  / | ___   __| | ___| | |     __ _ ___  ___ __ _  __| | ___
 | |\/| |/ _ \ / _` |/ _ \ | |    / _` / __|/ __/ _` |/ _` |/ _ \
 | |  | | (_) | (_| |  __/ | |___| (_| \__ \ (_| (_| | (_| |  __/
 |_|  |_|\___/ \__,_|\___|_|\_____\__,_|___/\___\__,_|\__,_|\___|
";

/// Writes progress to the terminal with colors.
///
/// One bar covers the whole run: created by `pulling_started`, advanced per
/// outcome, finished by `summary`. Lines printed while it is live go through
/// `suspend` so they do not tear the bar.
#[derive(Default)]
pub struct ConsoleReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn current_bar(&self) -> Option<ProgressBar> {
        self.bar.lock().ok().and_then(|bar| bar.clone())
    }

    fn line(&self, text: String) {
        match self.current_bar() {
            Some(pb) => pb.suspend(|| println!("{}", text)),
            None => println!("{}", text),
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{bar:30.cyan/blue} {pos}/{len} {msg}")
        .expect("static template")
        .progress_chars("#>-")
}

impl Reporter for ConsoleReporter {
    fn banner(&self) {
        println!("{}", BANNER.green());
        println!("{}", "Welcome to ModelCascade! Let's pull some models.\n".yellow());
    }

    fn pulling_started(&self, total: usize, skip_key: &str) {
        println!("{}", format!("\nStarting model pull process ({} models)...\n", total).green());
        println!(
            "{}",
            format!("Press '{}' and Enter to skip the current model.\n", skip_key).yellow()
        );

        let pb = ProgressBar::new(total as u64);
        pb.set_style(bar_style());
        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn item_started(&self, index: usize, total: usize, item: &Item) {
        match self.current_bar() {
            Some(pb) => pb.set_message(format!("[{}/{}] {}", index, total, item)),
            None => println!("{} {}", format!("[{}/{}]", index, total).bold(), item.to_string().cyan()),
        }
    }

    fn attempt(&self, item: &Item, attempt: u32, max_attempts: u32) {
        if attempt > 1 {
            self.line(format!(
                "  {} {} (attempt {}/{})",
                "Retrying".yellow(),
                item,
                attempt,
                max_attempts
            ));
        }
    }

    fn outcome(&self, item: &Item, outcome: Outcome) {
        let text = match outcome {
            Outcome::AlreadyPresent => format!("  {} {} is already pulled", "=".green(), item),
            Outcome::Success => format!("  {} {}", "Pulled".green(), item),
            Outcome::Failed => format!("  {} {}", "Failed".red(), item),
            Outcome::Skipped => format!("  {} {}", "Skipped".yellow(), item),
        };
        self.line(text);
        if let Some(pb) = self.current_bar() {
            pb.inc(1);
        }
    }

    fn skip_requested(&self) {
        self.line("Skipping current model...".yellow().to_string());
    }

    fn summary(&self, summary: &RunSummary) {
        let finished = self.bar.lock().ok().and_then(|mut bar| bar.take());
        if let Some(pb) = finished {
            if summary.interrupted {
                pb.abandon();
            } else {
                pb.finish();
            }
        }

        if summary.interrupted {
            println!("{}", "\nProcess interrupted by user. Exiting gracefully.".red());
        }
        println!("{}", "\nSummary:".green());
        println!("{}", format!("✅ Successfully pulled models: {}", summary.success).green());
        println!("{}", format!("❌ Failed to pull models: {}", summary.failed).red());
        println!("{}", format!("⏩ Skipped models: {}", summary.skipped).yellow());

        if !summary.failed_items.is_empty() {
            let names: Vec<&str> = summary.failed_items.iter().map(Item::name).collect();
            println!("   {} {}", "failed:".red(), names.join(", "));
        }
        if !summary.skipped_items.is_empty() {
            let names: Vec<&str> = summary.skipped_items.iter().map(Item::name).collect();
            println!("   {} {}", "skipped:".yellow(), names.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(reporter: &ConsoleReporter) -> Option<(u64, Option<u64>)> {
        reporter.current_bar().map(|pb| (pb.position(), pb.length()))
    }

    #[test]
    fn test_bar_style_template_is_valid() {
        let pb = ProgressBar::hidden();
        pb.set_style(bar_style());
        pb.set_length(3);
        pb.inc(1);
        assert_eq!(pb.position(), 1);
    }

    #[test]
    fn test_no_bar_before_pulling_started() {
        let reporter = ConsoleReporter::new();
        assert!(position(&reporter).is_none());

        // Output without a bar falls back to plain lines
        reporter.item_started(1, 1, &Item::parse("a").unwrap());
        reporter.outcome(&Item::parse("a").unwrap(), Outcome::Success);
        assert!(position(&reporter).is_none());
    }

    #[test]
    fn test_bar_sized_to_total_and_advanced_per_outcome() {
        let reporter = ConsoleReporter::new();
        reporter.pulling_started(3, "s");
        assert_eq!(position(&reporter), Some((0, Some(3))));

        let a = Item::parse("a").unwrap();
        let b = Item::parse("b").unwrap();
        reporter.item_started(1, 3, &a);
        reporter.attempt(&a, 2, 5);
        reporter.outcome(&a, Outcome::Failed);
        reporter.item_started(2, 3, &b);
        reporter.skip_requested();
        reporter.outcome(&b, Outcome::Skipped);
        assert_eq!(position(&reporter), Some((2, Some(3))));
    }

    #[test]
    fn test_summary_finishes_bar() {
        let reporter = ConsoleReporter::new();
        reporter.pulling_started(1, "s");
        reporter.outcome(&Item::parse("a").unwrap(), Outcome::AlreadyPresent);

        let mut summary = RunSummary::new();
        summary.record(&Item::parse("a").unwrap(), Outcome::AlreadyPresent);
        reporter.summary(&summary);
        assert!(position(&reporter).is_none());
    }
}
