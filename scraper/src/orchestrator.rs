use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use url::Url;

use crate::archive::{Snapshot, SnapshotIndex};
use crate::error::{ErrorKind, ScrapeError};
use crate::fetch::PageSource;
use crate::model::{Source, WeekFailure, WeekResult};
use crate::page::parse_ranking;
use crate::year::YearContext;

/// Resolved weeks, live first then archives newest first, plus what failed.
#[derive(Debug, Default, Serialize, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub weeks: Vec<WeekResult>,
    pub failures: Vec<WeekFailure>,
}

/// Sequences the live fetch and the archived ones, one request at a time.
pub struct Orchestrator<P, I> {
    pages: P,
    index: I,
    chart_url: Url,
}

impl<P: PageSource, I: SnapshotIndex> Orchestrator<P, I> {
    pub fn new(pages: P, index: I, chart_url: &str) -> Result<Self, ScrapeError> {
        let chart_url = Url::parse(chart_url).map_err(|source| ScrapeError::InvalidUrl {
            url: chart_url.to_string(),
            source,
        })?;
        Ok(Orchestrator {
            pages,
            index,
            chart_url,
        })
    }

    pub fn pages(&self) -> &P {
        &self.pages
    }

    /// Resolve the current week and `recent_weeks` archived ones.
    pub fn run(&self, recent_weeks: usize) -> Result<RunReport, ScrapeError> {
        self.run_on(recent_weeks, Local::now().date_naive())
    }

    /// Like [`Orchestrator::run`], with the live week's date given explicitly.
    ///
    /// Fails only when not a single week could be resolved.
    pub fn run_on(&self, recent_weeks: usize, today: NaiveDate) -> Result<RunReport, ScrapeError> {
        let mut report = RunReport::default();

        match self.scrape_live(today) {
            Ok(week) => report.weeks.push(week),
            Err(failure) => {
                log::warn!("live week failed: [{}] {}", failure.kind, failure.message);
                report.failures.push(failure);
            }
        }

        if recent_weeks > 0 {
            self.scrape_archives(recent_weeks, today, &mut report);
        }

        if report.weeks.is_empty() {
            return Err(ScrapeError::NothingResolved(report.failures));
        }
        Ok(report)
    }

    /// Resolve only archived weeks, skipping the live page.
    pub fn run_archives(&self, weeks: usize) -> Result<RunReport, ScrapeError> {
        self.run_archives_on(weeks, Local::now().date_naive())
    }

    /// Like [`Orchestrator::run_archives`], with the current date given explicitly.
    pub fn run_archives_on(&self, weeks: usize, today: NaiveDate) -> Result<RunReport, ScrapeError> {
        let mut report = RunReport::default();
        self.scrape_archives(weeks, today, &mut report);
        if report.weeks.is_empty() {
            return Err(ScrapeError::NothingResolved(report.failures));
        }
        Ok(report)
    }

    fn scrape_live(&self, today: NaiveDate) -> Result<WeekResult, WeekFailure> {
        let url = self.chart_url.as_str();
        log::info!("fetching live chart {}", url);

        let html = self
            .pages
            .fetch(url)
            .map_err(|f| WeekFailure::live(url, f.kind, f.message))?;
        let parsed = parse_ranking(&html, &self.chart_url)
            .map_err(|e| WeekFailure::live(url, ErrorKind::StructuralChange, e.to_string()))?;

        Ok(parsed.into_week_result(Source::Live, None, YearContext::Today(today)))
    }

    /// Scrape `weeks` past weeks. Captures from the current ISO week repeat
    /// the live ranking and are skipped.
    fn scrape_archives(&self, weeks: usize, today: NaiveDate, report: &mut RunReport) {
        let target = self.chart_url.as_str();
        let current_week = today.iso_week();
        // one extra week makes up for a capture of the current one
        let snapshots = match self.index.list_snapshots(target, weeks.saturating_add(1)) {
            Ok(snapshots) => snapshots,
            Err(e) => {
                log::warn!("archive index failed: {}", e);
                let kind = e.kind().unwrap_or(ErrorKind::IndexUnavailable);
                report
                    .failures
                    .push(WeekFailure::archive(target, None, kind, e.to_string()));
                return;
            }
        };
        let snapshots: Vec<Snapshot> = snapshots
            .into_iter()
            .filter(|snap| snap.captured_at.date().iso_week() != current_week)
            .take(weeks)
            .collect();

        if snapshots.is_empty() {
            log::warn!("archive index has no captures of {}", target);
            report.failures.push(WeekFailure::archive(
                target,
                None,
                ErrorKind::NoSnapshots,
                format!("no captures for the last {} weeks", weeks),
            ));
            return;
        }

        for snapshot in &snapshots {
            match self.scrape_snapshot(snapshot) {
                Ok(week) => report.weeks.push(week),
                Err(failure) => {
                    log::warn!(
                        "snapshot {} failed: [{}] {}",
                        snapshot.timestamp,
                        failure.kind,
                        failure.message
                    );
                    report.failures.push(failure);
                }
            }
        }
    }

    fn scrape_snapshot(&self, snapshot: &Snapshot) -> Result<WeekResult, WeekFailure> {
        let url = snapshot.archived_url.as_str();
        let timestamp = Some(snapshot.timestamp.as_str());
        log::info!("fetching snapshot {}", url);

        let html = self
            .pages
            .fetch(url)
            .map_err(|f| WeekFailure::archive(url, timestamp, f.kind, f.message))?;
        let parsed = parse_ranking(&html, &self.chart_url).map_err(|e| {
            WeekFailure::archive(url, timestamp, ErrorKind::StructuralChange, e.to_string())
        })?;

        Ok(parsed.into_week_result(
            Source::Archive,
            Some(snapshot.timestamp.clone()),
            YearContext::Snapshot(snapshot.captured_at),
        ))
    }
}
