// Pipeline modules, leaves first
pub mod config;
pub mod error;
pub mod model;
pub mod dom;
pub mod section;
pub mod entries;
pub mod year;
pub mod page;
pub mod fetch;
pub mod archive;
pub mod orchestrator;

// Re-export tests for integration testing
#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::archive::{ArchiveLocator, Snapshot, SnapshotIndex};
pub use crate::config::ScraperConfig;
pub use crate::entries::{extract_entries, MAX_ENTRIES};
pub use crate::error::{ErrorKind, FetchFailure, NotFound, ScrapeError};
pub use crate::fetch::{FetchOutcome, Fetcher, PageSource};
pub use crate::model::{Source, WeekEntry, WeekFailure, WeekResult};
pub use crate::orchestrator::{Orchestrator, RunReport};
pub use crate::page::{parse_ranking, ParsedPage};
pub use crate::section::{locate_section, Section, Strategy, RANKING_HEADING};
pub use crate::year::{infer_year, YearContext};
