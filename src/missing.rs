//! Missing-value report.
//!
//! [`missing_table`] counts Arrow nulls straight from the array metadata,
//! without materializing values. It deliberately shares no code with the
//! summarizer's missing accounting, so the two reports cross-check each
//! other: for every column, both must report the same `missing_count`.

use serde::{Deserialize, Serialize};

use crate::{column::share, table::Table};

/// Missing-value counts for a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingEntry {
    /// Column name.
    pub name: String,
    /// Number of missing values.
    pub missing_count: usize,
    /// Missing values as a share of all rows, 0.0 for an empty table.
    pub missing_share: f64,
}

/// Per-column missing-value report, keyed by unique column name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingTable {
    entries: Vec<MissingEntry>,
}

impl MissingTable {
    /// Returns the entries in table column order.
    pub fn entries(&self) -> &[MissingEntry] {
        &self.entries
    }

    /// Looks up the entry for a column by name.
    pub fn get(&self, name: &str) -> Option<&MissingEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Returns the number of columns in the report.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the report covers no columns.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the total number of missing values across all columns.
    pub fn total_missing(&self) -> usize {
        self.entries.iter().map(|e| e.missing_count).sum()
    }

    /// Returns the mean per-column missing share, 0.0 with no columns.
    pub fn avg_missing_share(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = self.entries.len() as f64;
        self.entries.iter().map(|e| e.missing_share).sum::<f64>() / n
    }
}

/// Computes per-column missing counts and shares for a table.
pub fn missing_table(table: &Table) -> MissingTable {
    let n_rows = table.len();
    let schema = table.schema();

    let entries = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let missing_count = table
                .batches()
                .iter()
                .map(|batch| batch.column(idx).null_count())
                .sum();

            MissingEntry {
                name: field.name().clone(),
                missing_count,
                missing_share: share(missing_count, n_rows),
            }
        })
        .collect();

    MissingTable { entries }
}
