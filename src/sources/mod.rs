pub mod date;
pub mod index;

use chrono::NaiveDate;
use serde::Serialize;

pub use date::parse_date;
pub use index::resolve_sources;

/// A discovered projection-table page and the FOMC meeting it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReference {
    pub url: String,
    pub meeting_date: NaiveDate,
}
