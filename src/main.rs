//! checksite main entry point
//!
//! This is the command-line interface for the checksite dead-link checker.

use anyhow::{Context, Result};
use checksite::config::{load_config, Config, Overrides};
use checksite::crawler::check_site;
use checksite::output::write_report;
use checksite::ReportFormat;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// checksite: find dead links on a website
///
/// checksite crawls a site breadth-first from the root URL, follows internal
/// links, checks every link it encounters (including external ones), and
/// reports the links that fail together with the pages referencing them.
///
/// Exit codes: 0 = no dead links, 1 = dead links found, 2 = fatal error.
#[derive(Parser, Debug)]
#[command(name = "checksite")]
#[command(version)]
#[command(about = "Find dead links on a website", long_about = None)]
struct Cli {
    /// Root URL to start crawling from
    #[arg(value_name = "ROOT_URL")]
    root_url: String,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<f64>,

    /// Regex of URLs to ignore entirely (repeatable)
    #[arg(long, value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Only expand pages at most this many links away from the root
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Maximum number of requests in flight
    #[arg(short = 'j', long, value_name = "N")]
    concurrency: Option<usize>,

    /// User-Agent header sent with every request
    #[arg(long, value_name = "AGENT")]
    user_agent: Option<String>,

    /// Additional host treated as internal (repeatable, supports "*.example.com")
    #[arg(long = "internal-host", value_name = "HOST")]
    internal_hosts: Vec<String>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let outcome = run(cli).await;
    if let Err(e) = &outcome {
        eprintln!("Error: {:#}", e);
    }

    ExitCode::from(exit_code(&outcome))
}

/// Maps the outcome of a run onto the process exit code
///
/// 0 = no dead links, 1 = dead links found, 2 = fatal error
fn exit_code(outcome: &Result<bool>) -> u8 {
    match outcome {
        Ok(false) => 0,
        Ok(true) => 1,
        Err(_) => 2,
    }
}

/// Runs one check; returns whether dead links were found
async fn run(cli: Cli) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    let overrides = Overrides {
        timeout_secs: cli.timeout,
        max_depth: cli.max_depth,
        concurrency: cli.concurrency,
        user_agent: cli.user_agent,
        exclude: cli.exclude,
        internal_hosts: cli.internal_hosts,
        format: cli.format,
        output_path: cli
            .output
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned()),
    };
    let config = config
        .with_overrides(overrides)
        .context("invalid command-line options")?;

    tracing::debug!("Effective configuration: {:?}", config);

    let report = check_site(&config, &cli.root_url)
        .await
        .with_context(|| format!("cannot check {}", cli.root_url))?;

    let stats = report.stats();
    tracing::info!(
        "Checked {} link(s) in {:.2}s: {} dead",
        stats.total_checked,
        report.duration_seconds(),
        stats.dead()
    );

    write_report(
        &report,
        config.output.format,
        config.output.path.as_deref().map(Path::new),
    )
    .context("failed to write report")?;

    Ok(report.has_dead_links())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so they never mix with a report written to stdout.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("checksite=info,warn"),
            1 => EnvFilter::new("checksite=debug,info"),
            2 => EnvFilter::new("checksite=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
