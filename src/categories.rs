//! Top-K frequency tables for categorical columns.
//!
//! [`top_categories`] profiles the first `max_columns` categorical columns
//! in table order; columns beyond the cap are silently skipped. Each table
//! lists the `top_k` most frequent distinct non-missing values, descending
//! by count, ties broken by first appearance in the data.

use serde::{Deserialize, Serialize};

use crate::{
    column::{collect_columns, value_counts, ColumnValues},
    error::Result,
    table::Table,
};

/// One distinct value and its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The distinct value.
    pub value: String,
    /// Number of rows holding it.
    pub count: usize,
}

/// Frequency table of the most common values in one categorical column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyTable {
    /// Column name.
    pub column: String,
    /// Most frequent values, at most `top_k` entries.
    pub entries: Vec<CategoryCount>,
}

impl FrequencyTable {
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the column had no non-missing values.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Computes top-K frequency tables for up to `max_columns` categorical
/// columns.
///
/// Returns one [`FrequencyTable`] per profiled column, in table order; an
/// empty vector when the table has no categorical columns or `max_columns`
/// is zero.
///
/// # Errors
///
/// Returns an error only if column materialization fails at the Arrow layer.
pub fn top_categories(
    table: &Table,
    max_columns: usize,
    top_k: usize,
) -> Result<Vec<FrequencyTable>> {
    let columns = collect_columns(table)?;
    let mut tables = Vec::new();

    for column in columns {
        if tables.len() == max_columns {
            break;
        }

        let values = match &column.values {
            ColumnValues::Categorical(values) => values,
            ColumnValues::Numeric(_) => continue,
        };

        let entries = value_counts(values)
            .into_iter()
            .take(top_k)
            .map(|(value, count)| CategoryCount { value, count })
            .collect();

        tables.push(FrequencyTable {
            column: column.name,
            entries,
        });
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::{
        array::{Int32Array, RecordBatch, StringArray},
        datatypes::{DataType, Field, Schema},
    };

    use super::*;

    fn sample_table() -> Table {
        let schema = Arc::new(Schema::new(vec![
            Field::new("age", DataType::Int32, true),
            Field::new("city", DataType::Utf8, true),
            Field::new("tier", DataType::Utf8, true),
        ]));

        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![Some(10), Some(20), Some(30), None])),
                Arc::new(StringArray::from(vec![
                    Some("A"),
                    Some("B"),
                    Some("A"),
                    None,
                ])),
                Arc::new(StringArray::from(vec![
                    Some("gold"),
                    Some("gold"),
                    Some("silver"),
                    Some("bronze"),
                ])),
            ],
        )
        .unwrap();

        Table::from_batch(batch).unwrap()
    }

    #[test]
    fn test_top_categories_basic() {
        let tables = top_categories(&sample_table(), 5, 2).unwrap();

        assert_eq!(tables.len(), 2);
        let city = tables.iter().find(|t| t.column == "city").unwrap();
        assert!(city.len() <= 2);
        assert_eq!(
            city.entries[0],
            CategoryCount {
                value: "A".to_string(),
                count: 2
            }
        );
        assert_eq!(
            city.entries[1],
            CategoryCount {
                value: "B".to_string(),
                count: 1
            }
        );
    }

    #[test]
    fn test_top_k_truncates() {
        let tables = top_categories(&sample_table(), 5, 2).unwrap();
        let tier = tables.iter().find(|t| t.column == "tier").unwrap();

        // Three distinct values, truncated to two; "silver" precedes
        // "bronze" on the first-seen tie-break.
        assert_eq!(tier.len(), 2);
        assert_eq!(tier.entries[0].value, "gold");
        assert_eq!(tier.entries[0].count, 2);
        assert_eq!(tier.entries[1].value, "silver");
    }

    #[test]
    fn test_max_columns_cap() {
        let tables = top_categories(&sample_table(), 1, 10).unwrap();
        assert_eq!(tables.len(), 1);
        // First categorical column in table order wins the slot.
        assert_eq!(tables[0].column, "city");
    }

    #[test]
    fn test_max_columns_zero() {
        let tables = top_categories(&sample_table(), 0, 10).unwrap();
        assert!(tables.is_empty());
    }

    #[test]
    fn test_numeric_columns_skipped() {
        let tables = top_categories(&sample_table(), 10, 10).unwrap();
        assert!(tables.iter().all(|t| t.column != "age"));
    }

    #[test]
    fn test_no_categorical_columns() {
        let schema = Arc::new(Schema::new(vec![Field::new("x", DataType::Int32, true)]));
        let batch = RecordBatch::try_new(
            schema,
            vec![Arc::new(Int32Array::from(vec![1, 2, 3])) as Arc<dyn arrow::array::Array>],
        )
        .unwrap();
        let table = Table::from_batch(batch).unwrap();

        let tables = top_categories(&table, 10, 10).unwrap();
        assert!(tables.is_empty());
    }

    #[test]
    fn test_all_missing_column_yields_empty_table() {
        let schema = Arc::new(Schema::new(vec![Field::new("c", DataType::Utf8, true)]));
        let batch = RecordBatch::try_new(
            schema,
            vec![Arc::new(StringArray::from(vec![None::<&str>, None]))
                as Arc<dyn arrow::array::Array>],
        )
        .unwrap();
        let table = Table::from_batch(batch).unwrap();

        let tables = top_categories(&table, 10, 10).unwrap();
        assert_eq!(tables.len(), 1);
        assert!(tables[0].is_empty());
    }

    #[test]
    fn test_idempotent() {
        let table = sample_table();
        let first = top_categories(&table, 5, 3).unwrap();
        let second = top_categories(&table, 5, 3).unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.column, b.column);
            assert_eq!(a.entries, b.entries);
        }
    }
}
