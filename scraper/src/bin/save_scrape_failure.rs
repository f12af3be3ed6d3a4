use anyhow::{Context, Result};
use douban_wom_scraper::dom::DomElement;
use douban_wom_scraper::section::find_heading;
use douban_wom_scraper::{
    parse_ranking, Fetcher, PageSource, ScraperConfig, RANKING_HEADING,
};
use scraper::Html;
use std::env;
use std::fs;
use std::path::Path;
use url::Url;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Get URL from command line arguments
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Please provide a URL and a test name");
        eprintln!("Usage: cargo run --bin save_scrape_failure <URL> <test_name>");
        std::process::exit(1);
    }

    let url = &args[1];
    let test_name = &args[2];

    println!("Fetching HTML from {}...", url);

    let config = ScraperConfig::default();
    let html = Fetcher::new(&config)?
        .fetch(url)
        .with_context(|| format!("Failed to fetch {}", url))?;

    // Create failures directory if it doesn't exist
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir).context("Failed to create failures directory")?;

    // Save the HTML for testing
    let file_path = failures_dir.join(format!("{}.html", test_name));
    fs::write(&file_path, &html).context("Failed to write HTML file")?;

    println!(
        "Saved HTML to {} for regression testing",
        file_path.display()
    );

    println!("\nAttempting to parse with the scraper to confirm failure:");

    let document = Html::parse_document(&html);
    let root = document.root_element();
    let heading = find_heading(root, RANKING_HEADING);
    let list_count = root
        .descendant_elements()
        .into_iter()
        .filter(|e| e.is_list())
        .count();

    println!("HTML analysis results:");
    println!("  - Has ranking heading: {}", heading.is_some());
    if let Some(heading) = heading {
        println!("  - Heading text: {}", heading.normalized_text());
    }
    println!("  - Lists on page: {}", list_count);

    // The chart URL resolves relative links the same way a real run does
    let base = Url::parse(&config.chart_url).context("Invalid chart URL")?;
    match parse_ranking(&html, &base) {
        Ok(page) if !page.entries.is_empty() => {
            println!(
                "⚠️ Parse succeeded via {} with {} entries! This may not be a failure case.",
                page.strategy.as_str(),
                page.entries.len()
            );
        }
        Ok(page) => {
            println!(
                "✅ List found via {} but no entries could be extracted",
                page.strategy.as_str()
            );
            println!("   Items are missing titles or links - content parsing issue");
        }
        Err(e) => {
            println!("✅ Parse failed with error: {}", e);
            println!("   Missing required HTML elements - structural issue");
            println!("\nThis test case has been saved and will be included in regression tests.");
        }
    }

    Ok(())
}
