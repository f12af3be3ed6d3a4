use anyhow::{Context, Result};
use clap::Parser;
use douban_wom_scraper::{ArchiveLocator, Fetcher, Orchestrator, ScrapeError, ScraperConfig};
use serde::Serialize;

/// Print Douban's weekly word-of-mouth top 5 as JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Also include N past weeks from Wayback Machine snapshots
    #[arg(long, value_name = "N")]
    recent: Option<usize>,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,

    /// Print weeks and per-week failures together as one JSON object
    #[arg(long)]
    report: bool,

    /// Per-request timeout in seconds
    #[arg(long, env = "DOUBAN_WOM_TIMEOUT")]
    timeout: Option<u64>,

    /// Extra attempts after a failed request
    #[arg(long, env = "DOUBAN_WOM_RETRIES")]
    retries: Option<u32>,

    /// HTTP(S) proxy for every request
    #[arg(long, env = "DOUBAN_WOM_PROXY")]
    proxy: Option<String>,

    /// Chart page to scrape
    #[arg(long)]
    url: Option<String>,
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("Failed to serialize results")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = ScraperConfig::default()
        .with_timeout_secs(cli.timeout)
        .with_retries(cli.retries)
        .with_proxy(cli.proxy)
        .with_chart_url(cli.url);

    let orchestrator = Orchestrator::new(
        Fetcher::new(&config)?,
        ArchiveLocator::new(&config)?,
        &config.chart_url,
    )?;

    let recent = cli.recent.unwrap_or(0);
    let report = match orchestrator.run(recent) {
        Ok(report) => report,
        Err(ScrapeError::NothingResolved(failures)) => {
            eprintln!("error: no week could be resolved");
            for failure in &failures {
                eprintln!("  [{}] {}: {}", failure.kind, failure.target, failure.message);
            }
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let output = if cli.report {
        to_json(&report, cli.pretty)?
    } else if cli.recent.is_some() {
        to_json(&report.weeks, cli.pretty)?
    } else {
        let live = report.weeks.first().context("live week missing from report")?;
        to_json(live, cli.pretty)?
    };
    println!("{}", output);

    Ok(())
}
