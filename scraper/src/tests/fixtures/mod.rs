use std::fs;
use std::path::{Path, PathBuf};

pub mod tree;

/// Chart pages saved by hand, one per layout the locator has to handle
pub const CHART_FIXTURES: &str = "src/tests/fixtures";
/// Chart pages captured by `save_scrape_failure` when the locator misbehaved
pub const FAILED_CHARTS: &str = "src/tests/fixtures/failures";

pub fn chart_path(dir: &str, name: &str) -> PathBuf {
    Path::new(dir).join(format!("{}.html", name))
}

/// Saved chart page; panics when it is missing since every test needs its page.
pub fn load_html_fixture(name: &str) -> String {
    fs::read_to_string(chart_path(CHART_FIXTURES, name))
        .unwrap_or_else(|e| panic!("chart fixture {} unreadable: {}", name, e))
}

/// Captured failing chart page, if one with this name was saved.
pub fn load_failure_html(name: &str) -> Option<String> {
    fs::read_to_string(chart_path(FAILED_CHARTS, name)).ok()
}
