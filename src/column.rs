//! Column materialization and type classification.
//!
//! Every analyzer sees a column through [`collect_columns`], which
//! materializes the Arrow data into plain Rust values and decides whether
//! the column is numeric or categorical. Keeping the classification in one
//! place guarantees the summarizer, the correlation matrix and the quality
//! detectors agree on which columns are numeric.
//!
//! A column is numeric when its Arrow type is numeric, or when it is a
//! string column with at least one non-null value and every non-null value
//! parses as a finite `f64`. Everything else, booleans included, is
//! categorical and rendered to strings. Missing means Arrow null; non-finite
//! floats count as present but are excluded from the moment statistics.

use std::{collections::HashMap, fmt};

use arrow::{
    array::{Array, Float64Array, StringArray},
    compute::cast,
    datatypes::DataType,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    table::Table,
};

/// Kind of data held in a column, as seen by the analyzers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DtypeKind {
    /// Values interpretable as numbers.
    Numeric,
    /// Everything else, treated as discrete labels.
    Categorical,
}

impl fmt::Display for DtypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Categorical => write!(f, "categorical"),
        }
    }
}

/// Materialized values of a single column, one entry per row.
#[derive(Debug, Clone)]
pub enum ColumnValues {
    /// Numeric values, `None` for missing.
    Numeric(Vec<Option<f64>>),
    /// Categorical values rendered as strings, `None` for missing.
    Categorical(Vec<Option<String>>),
}

impl ColumnValues {
    /// Returns the classification of this column.
    pub fn kind(&self) -> DtypeKind {
        match self {
            Self::Numeric(_) => DtypeKind::Numeric,
            Self::Categorical(_) => DtypeKind::Categorical,
        }
    }

    /// Returns the number of rows, missing included.
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Categorical(v) => v.len(),
        }
    }

    /// Returns true if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of missing entries.
    pub fn missing_count(&self) -> usize {
        match self {
            Self::Numeric(v) => v.iter().filter(|x| x.is_none()).count(),
            Self::Categorical(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }
}

/// A named column with its materialized values.
#[derive(Debug, Clone)]
pub struct ColumnData {
    /// Column name from the table schema.
    pub name: String,
    /// Materialized values.
    pub values: ColumnValues,
}

/// Materializes every column of a table in schema order.
///
/// # Errors
///
/// Returns an error if an Arrow cast fails; this does not happen for tables
/// built from the supported loaders.
pub fn collect_columns(table: &Table) -> Result<Vec<ColumnData>> {
    let schema = table.schema();
    let mut columns = Vec::with_capacity(schema.fields().len());

    for (idx, field) in schema.fields().iter().enumerate() {
        let values = if is_numeric_type(field.data_type()) {
            ColumnValues::Numeric(collect_numeric(table, idx)?)
        } else {
            classify_strings(collect_strings(table, idx)?)
        };

        columns.push(ColumnData {
            name: field.name().clone(),
            values,
        });
    }

    Ok(columns)
}

/// Share of `part` in `total`, 0.0 when `total` is zero.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn share(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

/// Occurrence counts of distinct non-missing values, most frequent first.
///
/// Ties keep first-appearance order: the counts are accumulated in first-seen
/// order and the sort is stable.
pub(crate) fn value_counts(values: &[Option<String>]) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<(&str, usize)> = Vec::new();

    for value in values.iter().flatten() {
        match index.get(value.as_str()) {
            Some(&i) => entries[i].1 += 1,
            None => {
                index.insert(value.as_str(), entries.len());
                entries.push((value.as_str(), 1));
            }
        }
    }

    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

fn is_numeric_type(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float16
            | DataType::Float32
            | DataType::Float64
    )
}

fn collect_numeric(table: &Table, idx: usize) -> Result<Vec<Option<f64>>> {
    let mut out = Vec::with_capacity(table.len());

    for batch in table.batches() {
        // One cast covers every integer and float width.
        let array = cast(batch.column(idx), &DataType::Float64).map_err(Error::Arrow)?;
        let array = array
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| Error::schema_mismatch("cast to Float64 produced unexpected array"))?;

        for i in 0..array.len() {
            if array.is_null(i) {
                out.push(None);
            } else {
                out.push(Some(array.value(i)));
            }
        }
    }

    Ok(out)
}

fn collect_strings(table: &Table, idx: usize) -> Result<Vec<Option<String>>> {
    let mut out = Vec::with_capacity(table.len());

    for batch in table.batches() {
        let array = cast(batch.column(idx), &DataType::Utf8).map_err(Error::Arrow)?;
        let array = array
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| Error::schema_mismatch("cast to Utf8 produced unexpected array"))?;

        for i in 0..array.len() {
            if array.is_null(i) {
                out.push(None);
            } else {
                out.push(Some(array.value(i).to_string()));
            }
        }
    }

    Ok(out)
}

/// Promotes a string column to numeric when all of its non-null values parse
/// as finite numbers.
fn classify_strings(values: Vec<Option<String>>) -> ColumnValues {
    let mut parsed: Vec<Option<f64>> = Vec::with_capacity(values.len());
    let mut non_null = 0usize;

    for value in &values {
        match value {
            None => parsed.push(None),
            Some(s) => match s.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => {
                    non_null += 1;
                    parsed.push(Some(v));
                }
                _ => return ColumnValues::Categorical(values),
            },
        }
    }

    if non_null == 0 {
        ColumnValues::Categorical(values)
    } else {
        ColumnValues::Numeric(parsed)
    }
}
