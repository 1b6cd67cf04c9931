// src/dataset.rs

use serde::Serialize;
use std::collections::BTreeSet;

use crate::table::{PageDataset, DATE_COLUMN, MIDPOINT_COLUMN};

/// All meetings' projection rows under one column set.
///
/// Columns are `date`, `midpoint`, then every other column seen on any page in
/// alphabetical order. A row has a cell for every column; `None` where its page
/// did not report that column or the cell was blank.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct UnifiedDataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl UnifiedDataset {
    /// Concatenate `pages` in order, widening every row to the union of columns.
    pub fn from_pages(pages: &[PageDataset]) -> Self {
        let columns = canonical_order(pages.iter().flat_map(|p| p.columns.iter().cloned()));

        let mut rows = Vec::with_capacity(pages.iter().map(PageDataset::len).sum());
        for page in pages {
            for mut record in page.records() {
                rows.push(
                    columns
                        .iter()
                        .map(|c| record.remove(c).flatten())
                        .collect(),
                );
            }
        }

        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at (`row`, `column`), if the column exists and the cell is non-empty.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }
}

/// `date`, `midpoint`, then the remaining distinct names sorted.
pub fn canonical_order<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let rest: BTreeSet<String> = names
        .into_iter()
        .filter(|n| n != DATE_COLUMN && n != MIDPOINT_COLUMN)
        .collect();

    [DATE_COLUMN.to_string(), MIDPOINT_COLUMN.to_string()]
        .into_iter()
        .chain(rest)
        .collect()
}
