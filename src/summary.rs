//! Per-column descriptive statistics and the dataset-level summary.
//!
//! [`summarize_dataset`] profiles every column of a table: counts, missing
//! shares, cardinality, and either moment statistics (numeric columns) or
//! the modal value (categorical columns). [`flatten_summary_for_print`]
//! projects the result into one flat record per column for display.

// Statistical computation over materialized values.
#![allow(clippy::cast_precision_loss)]

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    column::{collect_columns, share, value_counts, ColumnData, ColumnValues, DtypeKind},
    error::Result,
    table::Table,
};

/// Moment statistics for a numeric column, computed over finite non-missing
/// values only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericSummary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// 25th percentile (Q1).
    pub q1: f64,
    /// 50th percentile (median).
    pub median: f64,
    /// 75th percentile (Q3).
    pub q3: f64,
    /// Number of exact zeros among non-missing values.
    pub zero_count: usize,
}

/// Modal value of a categorical column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalSummary {
    /// Most frequent non-missing value (first seen wins ties).
    pub mode: String,
    /// Share of non-missing values equal to the mode.
    pub mode_share: f64,
}

/// Descriptive statistics for a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Column name.
    pub name: String,
    /// Numeric or categorical classification.
    pub dtype: DtypeKind,
    /// Number of non-missing values.
    pub count: usize,
    /// Number of missing values.
    pub missing_count: usize,
    /// Missing values as a share of all rows, 0.0 for an empty table.
    pub missing_share: f64,
    /// Number of distinct non-missing values.
    pub unique_count: usize,
    /// Moment statistics; absent for categorical columns and for numeric
    /// columns with no finite values.
    pub numeric: Option<NumericSummary>,
    /// Modal value; absent for numeric columns and all-missing columns.
    pub categorical: Option<CategoricalSummary>,
}

impl ColumnSummary {
    /// Returns true if the column holds at most one distinct value.
    pub fn is_constant(&self) -> bool {
        self.unique_count <= 1
    }
}

/// Summary of every column in a dataset, in table order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Number of rows in the table.
    pub n_rows: usize,
    /// Number of columns in the table.
    pub n_cols: usize,
    /// Per-column summaries, one per input column, order preserved.
    pub columns: Vec<ColumnSummary>,
}

impl DatasetSummary {
    /// Looks up a column summary by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// One flat display record per column, produced by
/// [`flatten_summary_for_print`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Column name.
    pub name: String,
    /// Classification, rendered as `numeric` or `categorical`.
    pub dtype: DtypeKind,
    /// Number of non-missing values.
    pub count: usize,
    /// Number of missing values.
    pub missing_count: usize,
    /// Missing share in [0, 1].
    pub missing_share: f64,
    /// Number of distinct non-missing values.
    pub unique: usize,
    /// Mean, numeric columns only.
    pub mean: Option<f64>,
    /// Population standard deviation, numeric columns only.
    pub std_dev: Option<f64>,
    /// Minimum, numeric columns only.
    pub min: Option<f64>,
    /// Maximum, numeric columns only.
    pub max: Option<f64>,
    /// Median, numeric columns only.
    pub median: Option<f64>,
    /// Modal value, categorical columns only.
    pub mode: Option<String>,
}

/// Computes descriptive statistics for every column of a table.
///
/// Deterministic and free of side effects: the same table always produces
/// the same summary.
///
/// # Errors
///
/// Returns an error only if column materialization fails at the Arrow layer.
pub fn summarize_dataset(table: &Table) -> Result<DatasetSummary> {
    let n_rows = table.len();
    let columns = collect_columns(table)?;

    let summaries = columns
        .iter()
        .map(|column| summarize_column(column, n_rows))
        .collect();

    Ok(DatasetSummary {
        n_rows,
        n_cols: columns.len(),
        columns: summaries,
    })
}

/// Projects a [`DatasetSummary`] into flat display rows.
///
/// Pure transformation; no statistics are recomputed.
pub fn flatten_summary_for_print(summary: &DatasetSummary) -> Vec<SummaryRow> {
    summary
        .columns
        .iter()
        .map(|c| SummaryRow {
            name: c.name.clone(),
            dtype: c.dtype,
            count: c.count,
            missing_count: c.missing_count,
            missing_share: c.missing_share,
            unique: c.unique_count,
            mean: c.numeric.as_ref().map(|n| n.mean),
            std_dev: c.numeric.as_ref().map(|n| n.std_dev),
            min: c.numeric.as_ref().map(|n| n.min),
            max: c.numeric.as_ref().map(|n| n.max),
            median: c.numeric.as_ref().map(|n| n.median),
            mode: c.categorical.as_ref().map(|m| m.mode.clone()),
        })
        .collect()
}

fn summarize_column(column: &ColumnData, n_rows: usize) -> ColumnSummary {
    let missing_count = column.values.missing_count();
    let count = n_rows - missing_count;
    let missing_share = share(missing_count, n_rows);

    match &column.values {
        ColumnValues::Numeric(values) => {
            let unique_count = numeric_unique_count(values);
            let numeric = numeric_summary(values);

            ColumnSummary {
                name: column.name.clone(),
                dtype: DtypeKind::Numeric,
                count,
                missing_count,
                missing_share,
                unique_count,
                numeric,
                categorical: None,
            }
        }
        ColumnValues::Categorical(values) => {
            let counts = value_counts(values);
            let unique_count = counts.len();
            let categorical = counts.first().map(|(mode, mode_count)| CategoricalSummary {
                mode: mode.clone(),
                mode_share: share(*mode_count, count),
            });

            ColumnSummary {
                name: column.name.clone(),
                dtype: DtypeKind::Categorical,
                count,
                missing_count,
                missing_share,
                unique_count,
                numeric: None,
                categorical,
            }
        }
    }
}

fn numeric_unique_count(values: &[Option<f64>]) -> usize {
    // Distinct by bit pattern; +0.0 and -0.0 are folded together.
    let distinct: HashSet<u64> = values
        .iter()
        .flatten()
        .map(|v| if *v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() })
        .collect();
    distinct.len()
}

fn numeric_summary(values: &[Option<f64>]) -> Option<NumericSummary> {
    let finite: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect();

    if finite.is_empty() {
        return None;
    }

    let n = finite.len();
    let mean = finite.iter().sum::<f64>() / n as f64;
    let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    let std_dev = variance.sqrt();

    let mut sorted = finite.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let zero_count = finite.iter().filter(|v| **v == 0.0).count();

    Some(NumericSummary {
        mean,
        std_dev,
        min: sorted[0],
        max: sorted[n - 1],
        q1: sorted[n / 4],
        median: sorted[n / 2],
        q3: sorted[3 * n / 4],
        zero_count,
    })
}
