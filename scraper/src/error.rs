use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::model::WeekFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Connection or DNS failure
    Network,
    Timeout,
    /// Non-2xx response
    HttpStatus,
    /// Expected heading or list not found in the page
    StructuralChange,
    /// Archive index unreachable or unreadable
    IndexUnavailable,
    /// Archive index answered but had no captures
    NoSnapshots,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Timeout => "timeout",
            ErrorKind::HttpStatus => "http_status",
            ErrorKind::StructuralChange => "structural_change",
            ErrorKind::IndexUnavailable => "index_unavailable",
            ErrorKind::NoSnapshots => "no_snapshots",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The failing half of a fetch: the kind of the last attempt plus a message.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{kind}: {message}")]
pub struct FetchFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl FetchFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        FetchFailure {
            kind,
            message: message.into(),
        }
    }

    /// Classify a transport error from reqwest.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if let Some(status) = err.status() {
            return FetchFailure::new(ErrorKind::HttpStatus, format!("HTTP {}", status));
        } else {
            ErrorKind::Network
        };
        FetchFailure::new(kind, err.to_string())
    }
}

/// Why the ranking section could not be located.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    #[error("no heading containing \"{0}\"")]
    HeadingMissing(String),

    #[error("heading \"{0}\" present but no list follows it")]
    ListMissing(String),
}

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchFailure),

    #[error("page structure changed: {0}")]
    StructuralChange(#[from] NotFound),

    #[error("archive index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("no week could be resolved: {}", summarize(.0))]
    NothingResolved(Vec<WeekFailure>),
}

impl ScrapeError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ScrapeError::Fetch(failure) => Some(failure.kind),
            ScrapeError::StructuralChange(_) => Some(ErrorKind::StructuralChange),
            ScrapeError::IndexUnavailable(_) => Some(ErrorKind::IndexUnavailable),
            ScrapeError::NothingResolved(failures) => failures.first().map(|f| f.kind),
            ScrapeError::Client(_) | ScrapeError::InvalidUrl { .. } => None,
        }
    }
}

fn summarize(failures: &[WeekFailure]) -> String {
    if failures.is_empty() {
        return "nothing attempted".to_string();
    }
    failures
        .iter()
        .map(|f| format!("[{}] {} ({})", f.kind, f.target, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}
