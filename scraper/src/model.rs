use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WeekEntry {
    /// 1-based position of the item in the list; gaps mean skipped items
    pub rank: u8,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Live,
    Archive,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WeekResult {
    /// Label as published next to the heading, e.g. "11月28日 更新"
    pub week_label: String,
    /// Best-effort; null when the label carries no usable date
    pub inferred_year: Option<i32>,
    pub source: Source,
    pub snapshot_timestamp: Option<String>,
    pub entries: Vec<WeekEntry>,
}

/// A week that could not be resolved. Reported next to the results, never inside them.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct WeekFailure {
    pub source: Source,
    /// URL that failed, or the index query target
    pub target: String,
    pub snapshot_timestamp: Option<String>,
    pub kind: ErrorKind,
    pub message: String,
}

impl WeekFailure {
    pub fn live(target: &str, kind: ErrorKind, message: impl Into<String>) -> Self {
        WeekFailure {
            source: Source::Live,
            target: target.to_string(),
            snapshot_timestamp: None,
            kind,
            message: message.into(),
        }
    }

    pub fn archive(
        target: &str,
        timestamp: Option<&str>,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        WeekFailure {
            source: Source::Archive,
            target: target.to_string(),
            snapshot_timestamp: timestamp.map(str::to_string),
            kind,
            message: message.into(),
        }
    }
}
