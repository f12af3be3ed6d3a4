use scraper::Html;
use url::Url;

use crate::entries::extract_entries;
use crate::error::NotFound;
use crate::model::{Source, WeekEntry, WeekResult};
use crate::section::{locate_section, Strategy, RANKING_HEADING};
use crate::year::{infer_year, YearContext};

/// What one chart page yields before it is placed in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    pub week_label: String,
    pub entries: Vec<WeekEntry>,
    pub strategy: Strategy,
}

/// Parse the weekly word-of-mouth ranking out of a chart page.
///
/// `base` resolves relative links; pass the live chart URL for archived
/// pages too so links point at the site rather than at the archive.
pub fn parse_ranking(html: &str, base: &Url) -> Result<ParsedPage, NotFound> {
    let document = Html::parse_document(html);
    let section = locate_section(document.root_element(), RANKING_HEADING)?;

    Ok(ParsedPage {
        week_label: section.week_label(RANKING_HEADING),
        entries: extract_entries(section.list, base),
        strategy: section.strategy,
    })
}

impl ParsedPage {
    pub fn into_week_result(
        self,
        source: Source,
        snapshot_timestamp: Option<String>,
        context: YearContext,
    ) -> WeekResult {
        WeekResult {
            inferred_year: infer_year(&self.week_label, context),
            week_label: self.week_label,
            source,
            snapshot_timestamp,
            entries: self.entries,
        }
    }
}
