use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, error, info};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use modelcascade::cli::Cli;
use modelcascade::config::Config;
use modelcascade::coordination::{SkipListener, SkipSignal, watch_for_interrupt};
use modelcascade::domain::{Item, RunSummary};
use modelcascade::fetch::{CommandInvoker, ListingPresenceChecker, NeverPresent, PresenceChecker};
use modelcascade::input::collect_items;
use modelcascade::report::{ConsoleReporter, Reporter};
use modelcascade::runner::{PullOrchestrator, RetryPolicy};

fn setup_logging(level: LevelFilter) -> Result<PathBuf> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("modelcascade")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("modelcascade.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG, when set, wins over the computed level
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    Ok(log_file)
}

fn log_level(cli: &Cli, config: &Config) -> LevelFilter {
    if cli.is_verbose() {
        return LevelFilter::Debug;
    }
    config
        .log_level
        .as_deref()
        .and_then(|level| LevelFilter::from_str(level).ok())
        .unwrap_or(LevelFilter::Info)
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter::new());
    reporter.banner();

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let candidates = {
        let stdin = std::io::stdin();
        let mut reader = stdin.lock();
        let mut stdout = std::io::stdout();
        cli.item_source().candidates(&mut reader, &mut stdout)
    };
    let items = match candidates.and_then(|candidates| collect_items(&candidates)) {
        Ok(items) => items,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", format!("{}. Exiting.", e).red());
            std::process::exit(1);
        }
    };
    let policy = RetryPolicy::from_config(&config.retry)?;

    let skip = SkipSignal::new();
    let interrupt = CancellationToken::new();

    // Detached: a thread blocked on stdin is abandoned at exit, never joined
    SkipListener::new(skip.clone(), config.skip.key.clone(), reporter.clone())
        .spawn()
        .context("Failed to start skip listener")?;
    let watcher = watch_for_interrupt(interrupt.clone());

    reporter.pulling_started(items.len(), &config.skip.key);

    let invoker = Arc::new(CommandInvoker::from_config(&config.fetch));
    let summary = if config.fetch.presence_check {
        let presence = Arc::new(ListingPresenceChecker::from_config(&config.fetch));
        pull(invoker, presence, policy, skip, interrupt, reporter.clone(), &items).await?
    } else {
        pull(invoker, Arc::new(NeverPresent), policy, skip, interrupt, reporter.clone(), &items).await?
    };
    watcher.abort();

    reporter.summary(&summary);
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
        );
    }

    Ok(())
}

async fn pull<P: PresenceChecker>(
    invoker: Arc<CommandInvoker>,
    presence: Arc<P>,
    policy: RetryPolicy,
    skip: SkipSignal,
    interrupt: CancellationToken,
    reporter: Arc<dyn Reporter>,
    items: &[Item],
) -> Result<RunSummary> {
    let orchestrator = PullOrchestrator::new(invoker, presence, policy)
        .with_skip_signal(skip)
        .with_interrupt(interrupt)
        .with_reporter(reporter);
    Ok(orchestrator.run(items).await?)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration, then apply command-line overrides
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);

    // Setup logging
    let log_file = setup_logging(log_level(&cli, &config)).context("Failed to setup logging")?;
    info!("Logging initialized, writing to: {}", log_file.display());
    info!("Starting with config from: {:?}", cli.config);

    config.validate().context("Invalid configuration")?;

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
