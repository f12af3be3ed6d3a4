use anyhow::{Context, Result};
use clap::Parser;
use douban_wom_scraper::{
    ArchiveLocator, Fetcher, Orchestrator, ScrapeError, ScraperConfig, SnapshotIndex,
};

/// Scrape past weeks of the ranking from Wayback Machine snapshots only
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of past weeks to look up
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u64).range(1..))]
    weeks: u64,

    /// Only list the selected snapshots, do not fetch them
    #[arg(long)]
    list: bool,

    /// Timeout in seconds for the archive index query
    #[arg(long, env = "DOUBAN_WOM_INDEX_TIMEOUT")]
    index_timeout: Option<u64>,

    /// HTTP(S) proxy for every request
    #[arg(long, env = "DOUBAN_WOM_PROXY")]
    proxy: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let weeks = usize::try_from(cli.weeks).context("--weeks is too large")?;

    let config = ScraperConfig::default()
        .with_index_timeout_secs(cli.index_timeout)
        .with_proxy(cli.proxy);
    let locator = ArchiveLocator::new(&config)?;

    if cli.list {
        let snapshots = locator
            .list_snapshots(&config.chart_url, weeks)
            .context("Failed to query the archive index")?;
        if snapshots.is_empty() {
            eprintln!("No captures of {} found", config.chart_url);
        }
        let json = serde_json::to_string_pretty(&snapshots)
            .context("Failed to serialize snapshot list")?;
        println!("{}", json);
        return Ok(());
    }

    let orchestrator = Orchestrator::new(Fetcher::new(&config)?, locator, &config.chart_url)?;
    match orchestrator.run_archives(weeks) {
        Ok(report) => {
            for failure in &report.failures {
                eprintln!("[{}] {}: {}", failure.kind, failure.target, failure.message);
            }
            let json = serde_json::to_string_pretty(&report.weeks)
                .context("Failed to serialize archived weeks")?;
            println!("{}", json);
            Ok(())
        }
        Err(ScrapeError::NothingResolved(failures)) => {
            eprintln!("error: no archived week could be resolved");
            for failure in &failures {
                eprintln!("  [{}] {}: {}", failure.kind, failure.target, failure.message);
            }
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weeks_must_be_positive() {
        assert!(Cli::try_parse_from(["archive_scraper", "--weeks", "0"]).is_err());
        let cli = Cli::try_parse_from(["archive_scraper", "--weeks", "2"]).unwrap();
        assert_eq!(cli.weeks, 2);
    }
}
