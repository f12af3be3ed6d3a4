//! Past weeks of the chart from the Wayback Machine's CDX index.

use chrono::{Datelike, IsoWeek, NaiveDateTime};
use reqwest::blocking::Client;
use serde::Serialize;
use std::collections::HashSet;

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::fetch::build_client;

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const CDX_FIELDS: &str = "timestamp,original,statuscode";

/// One archived capture of the chart page.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Wayback timestamp, `YYYYMMDDhhmmss`
    pub timestamp: String,
    pub archived_url: String,
    pub captured_at: NaiveDateTime,
}

/// Anything that can list past captures of a page.
pub trait SnapshotIndex {
    /// At most `count` captures, newest first, no two in the same calendar week.
    fn list_snapshots(&self, url: &str, count: usize) -> Result<Vec<Snapshot>, ScrapeError>;
}

/// A raw row of the CDX answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdxRow {
    pub timestamp: String,
    pub original: String,
    pub statuscode: String,
}

impl CdxRow {
    fn from_fields(fields: &[&str]) -> Option<Self> {
        match fields {
            [timestamp, original, statuscode, ..] => Some(CdxRow {
                timestamp: timestamp.to_string(),
                original: original.to_string(),
                statuscode: statuscode.to_string(),
            }),
            _ => None,
        }
    }
}

/// Parse a CDX answer requested with `fl=timestamp,original,statuscode`.
///
/// JSON output is an array of string arrays whose first row is the header.
/// Plain output is one space separated row per line in the same field order.
pub fn parse_cdx_response(body: &str) -> Result<Vec<CdxRow>, String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        let table: Vec<Vec<String>> =
            serde_json::from_str(trimmed).map_err(|e| format!("malformed CDX JSON: {}", e))?;
        let mut rows = table.into_iter();
        let Some(header) = rows.next() else {
            return Ok(Vec::new());
        };
        let column = |name: &str| header.iter().position(|h| h == name);
        let (Some(ts), Some(orig), Some(status)) =
            (column("timestamp"), column("original"), column("statuscode"))
        else {
            return Err(format!("CDX header lacks expected fields: {:?}", header));
        };
        return Ok(rows
            .filter_map(|row| {
                Some(CdxRow {
                    timestamp: row.get(ts)?.clone(),
                    original: row.get(orig)?.clone(),
                    statuscode: row.get(status)?.clone(),
                })
            })
            .collect());
    }

    Ok(trimmed
        .lines()
        .filter_map(|line| CdxRow::from_fields(&line.split_whitespace().collect::<Vec<_>>()))
        .collect())
}

/// Keep successful captures, newest first, one per ISO week, at most `count`.
pub fn select_weekly(rows: Vec<CdxRow>, count: usize, wayback_prefix: &str) -> Vec<Snapshot> {
    let mut captures: Vec<Snapshot> = rows
        .into_iter()
        .filter(|row| row.statuscode == "200")
        .filter_map(|row| {
            let captured_at = NaiveDateTime::parse_from_str(&row.timestamp, TIMESTAMP_FORMAT).ok()?;
            Some(Snapshot {
                archived_url: archived_url(wayback_prefix, &row.timestamp, &row.original),
                timestamp: row.timestamp,
                captured_at,
            })
        })
        .collect();
    captures.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut weeks: HashSet<IsoWeek> = HashSet::new();
    captures
        .into_iter()
        .filter(|snap| weeks.insert(snap.captured_at.date().iso_week()))
        .take(count)
        .collect()
}

/// Raw capture URL; the `id_` flag asks for the page without the Wayback toolbar.
pub fn archived_url(prefix: &str, timestamp: &str, original: &str) -> String {
    format!("{}/{}id_/{}", prefix.trim_end_matches('/'), timestamp, original)
}

#[derive(Debug, Clone)]
pub struct ArchiveLocator {
    client: Client,
    cdx_url: String,
    wayback_prefix: String,
}

impl ArchiveLocator {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        Ok(ArchiveLocator {
            client: build_client(config, config.index_timeout)?,
            cdx_url: config.cdx_url.clone(),
            wayback_prefix: config.wayback_prefix.clone(),
        })
    }

    fn query(&self, url: &str, count: usize) -> Result<String, ScrapeError> {
        // a week holds at most seven daily captures
        let limit = format!("-{}", count.saturating_mul(7));
        let response = self
            .client
            .get(&self.cdx_url)
            .query(&[
                ("url", url),
                ("output", "json"),
                ("fl", CDX_FIELDS),
                ("filter", "statuscode:200"),
                ("collapse", "timestamp:8"),
                ("limit", limit.as_str()),
            ])
            .send()
            .map_err(|e| ScrapeError::IndexUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::IndexUnavailable(format!(
                "HTTP {} from {}",
                status, self.cdx_url
            )));
        }
        response
            .text()
            .map_err(|e| ScrapeError::IndexUnavailable(e.to_string()))
    }
}

impl SnapshotIndex for ArchiveLocator {
    fn list_snapshots(&self, url: &str, count: usize) -> Result<Vec<Snapshot>, ScrapeError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        log::info!("querying archive index for {} weekly captures of {}", count, url);

        let body = self.query(url, count)?;
        let rows = parse_cdx_response(&body).map_err(ScrapeError::IndexUnavailable)?;
        let snapshots = select_weekly(rows, count, &self.wayback_prefix);
        log::info!("archive index returned {} weekly captures", snapshots.len());
        Ok(snapshots)
    }
}
