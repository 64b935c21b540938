//! Pairwise Pearson correlation over the numeric columns of a table.
//!
//! Correlations are pairwise-complete: each pair of columns is computed over
//! the rows where both values are present and finite. Undefined entries —
//! a zero-variance column, or fewer than two complete pairs — are `NaN`,
//! including on the diagonal of a constant column. Consumers must treat NaN
//! as "no signal", never as an error.

// Statistical computation over materialized values.
#![allow(clippy::cast_precision_loss)]

use serde::{Deserialize, Serialize};

use crate::{
    column::{collect_columns, ColumnValues},
    error::Result,
    table::Table,
};

/// Square, symmetric correlation matrix over the numeric columns.
///
/// Empty (no columns, no values) when the table has fewer than two numeric
/// columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    /// Row-major values, `columns.len() * columns.len()` entries.
    values: Vec<f64>,
}

impl CorrelationMatrix {
    /// Creates an empty matrix.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the names of the correlated columns, in table order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of correlated columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the matrix has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the entry at `(row, col)` by index, if in bounds.
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.len() && col < self.len() {
            Some(self.values[row * self.len() + col])
        } else {
            None
        }
    }

    /// Returns the correlation between two columns by name.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.value(i, j)
    }
}

/// Computes the pairwise Pearson correlation matrix of a table.
///
/// Non-numeric columns are excluded entirely; with fewer than two numeric
/// columns the result is empty rather than an error.
///
/// # Errors
///
/// Returns an error only if column materialization fails at the Arrow layer.
pub fn correlation_matrix(table: &Table) -> Result<CorrelationMatrix> {
    let numeric: Vec<(String, Vec<Option<f64>>)> = collect_columns(table)?
        .into_iter()
        .filter_map(|column| match column.values {
            ColumnValues::Numeric(values) => Some((column.name, values)),
            ColumnValues::Categorical(_) => None,
        })
        .collect();

    if numeric.len() < 2 {
        return Ok(CorrelationMatrix::empty());
    }

    let n = numeric.len();
    let mut values = vec![f64::NAN; n * n];

    for i in 0..n {
        for j in i..n {
            let r = if i == j {
                self_correlation(&numeric[i].1)
            } else {
                pearson(&numeric[i].1, &numeric[j].1)
            };
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: numeric.into_iter().map(|(name, _)| name).collect(),
        values,
    })
}

/// 1.0 for a column with nonzero variance, NaN otherwise.
fn self_correlation(values: &[Option<f64>]) -> f64 {
    let finite: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect();

    if finite.len() < 2 {
        return f64::NAN;
    }

    let mean = finite.iter().sum::<f64>() / finite.len() as f64;
    let spread = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>();

    if spread > 0.0 {
        1.0
    } else {
        f64::NAN
    }
}

/// Pearson correlation over rows where both values are present and finite.
fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        })
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return f64::NAN;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::{
        array::{Float64Array, Int32Array, RecordBatch, StringArray},
        datatypes::{DataType, Field, Schema},
    };

    use super::*;

    fn table_of(fields: Vec<Field>, arrays: Vec<Arc<dyn arrow::array::Array>>) -> Table {
        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema, arrays).unwrap();
        Table::from_batch(batch).unwrap()
    }

    #[test]
    fn test_perfect_positive_and_negative() {
        let table = table_of(
            vec![
                Field::new("x", DataType::Float64, true),
                Field::new("double", DataType::Float64, true),
                Field::new("neg", DataType::Float64, true),
            ],
            vec![
                Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0, 4.0])),
                Arc::new(Float64Array::from(vec![2.0, 4.0, 6.0, 8.0])),
                Arc::new(Float64Array::from(vec![8.0, 6.0, 4.0, 2.0])),
            ],
        );

        let corr = correlation_matrix(&table).unwrap();
        assert_eq!(corr.len(), 3);
        assert!((corr.get("x", "double").unwrap() - 1.0).abs() < 1e-9);
        assert!((corr.get("x", "neg").unwrap() + 1.0).abs() < 1e-9);
        assert!((corr.get("x", "x").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric() {
        let table = table_of(
            vec![
                Field::new("a", DataType::Float64, true),
                Field::new("b", DataType::Float64, true),
            ],
            vec![
                Arc::new(Float64Array::from(vec![1.0, 3.0, 2.0, 5.0])),
                Arc::new(Float64Array::from(vec![2.0, 1.0, 4.0, 3.0])),
            ],
        );

        let corr = correlation_matrix(&table).unwrap();
        let ab = corr.get("a", "b").unwrap();
        let ba = corr.get("b", "a").unwrap();
        assert!((ab - ba).abs() < 1e-12);
        assert!(ab.abs() <= 1.0 + 1e-12);
    }

    #[test]
    fn test_pairwise_complete_deletion() {
        // The missing age row drops the (None, 170) pair; the remaining
        // three pairs are perfectly linear.
        let table = table_of(
            vec![
                Field::new("age", DataType::Int32, true),
                Field::new("height", DataType::Int32, true),
            ],
            vec![
                Arc::new(Int32Array::from(vec![Some(10), Some(20), Some(30), None])),
                Arc::new(Int32Array::from(vec![140, 150, 160, 170])),
            ],
        );

        let corr = correlation_matrix(&table).unwrap();
        assert!((corr.get("age", "height").unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_numeric_column_is_empty() {
        let table = table_of(
            vec![
                Field::new("x", DataType::Float64, true),
                Field::new("label", DataType::Utf8, true),
            ],
            vec![
                Arc::new(Float64Array::from(vec![1.0, 2.0])),
                Arc::new(StringArray::from(vec!["a", "b"])),
            ],
        );

        let corr = correlation_matrix(&table).unwrap();
        assert!(corr.is_empty());
        assert_eq!(corr.len(), 0);
    }

    #[test]
    fn test_no_numeric_columns_is_empty() {
        let table = table_of(
            vec![
                Field::new("a", DataType::Utf8, true),
                Field::new("b", DataType::Utf8, true),
            ],
            vec![
                Arc::new(StringArray::from(vec!["x", "y"])),
                Arc::new(StringArray::from(vec!["u", "v"])),
            ],
        );

        let corr = correlation_matrix(&table).unwrap();
        assert!(corr.is_empty());
        assert!(corr.get("a", "b").is_none());
    }

    #[test]
    fn test_categorical_columns_excluded() {
        let table = table_of(
            vec![
                Field::new("x", DataType::Float64, true),
                Field::new("city", DataType::Utf8, true),
                Field::new("y", DataType::Float64, true),
            ],
            vec![
                Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0])),
                Arc::new(StringArray::from(vec!["a", "b", "a"])),
                Arc::new(Float64Array::from(vec![3.0, 1.0, 2.0])),
            ],
        );

        let corr = correlation_matrix(&table).unwrap();
        assert_eq!(corr.columns(), &["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_constant_column_is_nan() {
        let table = table_of(
            vec![
                Field::new("x", DataType::Float64, true),
                Field::new("flat", DataType::Float64, true),
            ],
            vec![
                Arc::new(Float64Array::from(vec![1.0, 2.0, 3.0])),
                Arc::new(Float64Array::from(vec![7.0, 7.0, 7.0])),
            ],
        );

        let corr = correlation_matrix(&table).unwrap();
        assert!(corr.get("x", "flat").unwrap().is_nan());
        // The diagonal of a constant column is undefined too.
        assert!(corr.get("flat", "flat").unwrap().is_nan());
        assert!((corr.get("x", "x").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_row_table_is_empty_or_nan() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("a", DataType::Float64, true),
            Field::new("b", DataType::Float64, true),
        ]));
        let table = Table::empty(schema);

        let corr = correlation_matrix(&table).unwrap();
        // Two numeric columns exist, so the matrix has shape, but every
        // entry is undefined.
        assert_eq!(corr.len(), 2);
        assert!(corr.get("a", "b").unwrap().is_nan());
        assert!(corr.get("a", "a").unwrap().is_nan());
    }

    #[test]
    fn test_out_of_bounds_value() {
        let corr = CorrelationMatrix::empty();
        assert!(corr.value(0, 0).is_none());
    }
}
