// src/error.rs

use std::fmt;
use thiserror::Error;

use crate::fetch::FetchError;

/// Pipeline stage an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    IndexResolution,
    DateParsing,
    TableExtraction,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::IndexResolution => "index resolution",
            Stage::DateParsing => "date parsing",
            Stage::TableExtraction => "table extraction",
        })
    }
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{stage}: failed to fetch {url}: {source}")]
    Fetch {
        stage: Stage,
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("date parsing: malformed source url {url}: {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("table extraction: no anchor heading on {url}")]
    AnchorNotFound { url: String },

    #[error("table extraction: no table after the anchor heading on {url}")]
    TableNotFound { url: String },

    #[error("table extraction: projections table on {url} has no header row")]
    HeaderRowNotFound { url: String },

    #[error(
        "table extraction: row {row} on {url} has {found} cells, header has {expected}"
    )]
    RowColumnMismatch {
        url: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("table extraction: no projection rows were extracted")]
    NoData,
}

impl ScrapeError {
    pub(crate) fn malformed(url: &str, reason: impl Into<String>) -> Self {
        ScrapeError::MalformedUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            ScrapeError::Fetch { stage, .. } => *stage,
            ScrapeError::MalformedUrl { .. } => Stage::DateParsing,
            ScrapeError::AnchorNotFound { .. }
            | ScrapeError::TableNotFound { .. }
            | ScrapeError::HeaderRowNotFound { .. }
            | ScrapeError::RowColumnMismatch { .. }
            | ScrapeError::NoData => Stage::TableExtraction,
        }
    }

    /// The source URL the error concerns, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            ScrapeError::Fetch { url, .. }
            | ScrapeError::MalformedUrl { url, .. }
            | ScrapeError::AnchorNotFound { url }
            | ScrapeError::TableNotFound { url }
            | ScrapeError::HeaderRowNotFound { url }
            | ScrapeError::RowColumnMismatch { url, .. } => Some(url),
            ScrapeError::NoData => None,
        }
    }
}
