pub mod dom;
pub mod extract;
pub mod slug;

use chrono::NaiveDate;
use std::collections::BTreeMap;

pub use extract::{extract_table, parse_page};
pub use slug::slugify;

/// Name of the column carrying the meeting date.
pub const DATE_COLUMN: &str = "date";
/// Name given to the first column of every projections table.
pub const MIDPOINT_COLUMN: &str = "midpoint";

/// One body row keyed by column name; `None` marks an empty cell.
pub type RawRow = BTreeMap<String, Option<String>>;

/// The projections table of a single meeting.
///
/// `columns` and every entry of `rows` are paired by position; `columns[0]`
/// is always `midpoint`. The meeting date applies to every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDataset {
    pub url: String,
    pub meeting_date: NaiveDate,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl PageDataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as name → value maps, with the meeting date added under `date`.
    pub fn records(&self) -> impl Iterator<Item = RawRow> + '_ {
        let date = self.meeting_date.format("%Y-%m-%d").to_string();
        self.rows.iter().map(move |cells| {
            let mut row: RawRow = self
                .columns
                .iter()
                .cloned()
                .zip(cells.iter().cloned())
                .collect();
            row.insert(DATE_COLUMN.to_string(), Some(date.clone()));
            row
        })
    }
}
