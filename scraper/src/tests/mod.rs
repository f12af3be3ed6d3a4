use anyhow::Result;
use std::fs;

pub mod fixtures;

/// Keep a chart page the locator got wrong so the regression suite picks it up.
pub fn save_failed_html(html: &str, name: &str) -> Result<()> {
    fs::create_dir_all(fixtures::FAILED_CHARTS)?;
    let path = fixtures::chart_path(fixtures::FAILED_CHARTS, name);
    fs::write(&path, html)?;
    eprintln!("chart page kept at {}", path.display());
    Ok(())
}
