//! Observer results scraper CLI
//!
//! With no arguments this fetches the built-in results page and writes
//! `data/results.json` and `data/results.csv`. Scrape failures still exit 0
//! so the scheduler stays green; only setup problems exit 1.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use observer_scraper::{
    error::Result,
    models::Config,
    pipeline::Pipeline,
    services::{FileSource, HeuristicExtractor, HttpSource, PageSource},
    storage::{LocalStorage, SnapshotStorage},
};

/// Scrape live election results into JSON and CSV snapshots
#[derive(Parser, Debug)]
#[command(name = "observer-scraper", version, about)]
struct Cli {
    /// TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for results.json / results.csv
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Parse a saved page instead of fetching
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Override the page URL
    #[arg(long, global = true)]
    url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, parse and save a snapshot (default)
    Run,

    /// Validate configuration
    Validate,

    /// Show the current snapshot
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Build the effective configuration from file and flags.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            log::info!("Loaded configuration from {}", path.display());
            config
        }
        None => Config::default(),
    };

    if let Some(url) = &cli.url {
        config.scraper.source_url = url.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.dir = dir.clone();
    }

    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let storage = LocalStorage::from_config(&config.output);
    let extractor = HeuristicExtractor::new(&config.extract);

    let source: Box<dyn PageSource> = match &cli.input {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new(&config.scraper)?),
    };

    let outcome = Pipeline::new(source.as_ref(), &extractor, &storage).run()?;
    let summary = outcome.summary();
    log::info!(
        "Artifacts: {} and {}",
        summary.json_path.display(),
        summary.csv_path.display()
    );
    println!("{}", outcome.report());
    Ok(())
}

fn validate(config: &Config) {
    log::info!("✓ Config OK");
    println!("source_url:    {}", config.scraper.source_url);
    println!("user_agent:    {}", config.scraper.user_agent);
    println!("timeout_secs:  {}", config.scraper.timeout_secs);
    println!("anchors:       {}", config.extract.anchors.join(" | "));
    println!("status_tokens: {}", config.extract.status_tokens.join(" | "));
    println!("output_dir:    {}", config.output.dir.display());
}

fn info(config: &Config) -> Result<()> {
    let storage = LocalStorage::from_config(&config.output);
    log::info!("Storage directory: {}", storage.root_dir().display());

    match storage.load_snapshot()? {
        Some(snapshot) => {
            println!("Source:     {}", snapshot.source);
            println!("Fetched at: {}", snapshot.fetched_at);
            println!("Rows:       {}", snapshot.rows.len());
            if let Some(error) = &snapshot.error {
                println!("Error:      {error}");
            }
        }
        None => println!("No snapshot found yet."),
    }
    Ok(())
}

fn execute(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    match cli.command.as_ref().unwrap_or(&Command::Run) {
        Command::Run => run(cli, &config),
        Command::Validate => {
            validate(&config);
            Ok(())
        }
        Command::Info => info(&config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Fatal: {e}");
            ExitCode::FAILURE
        }
    }
}
