//! Quality flag types.

use serde::{Deserialize, Serialize};

/// Duplicate statistics for an ID-like column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdDuplicates {
    /// Column name.
    pub name: String,
    /// Number of rows beyond the distinct values, `n_rows - unique_count`.
    pub duplicate_count: usize,
    /// Duplicate rows as a share of all rows, in (0, 1].
    pub duplicate_rate: f64,
}

/// Cardinality statistics for a flagged categorical column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighCardinality {
    /// Column name.
    pub name: String,
    /// Number of distinct non-missing values.
    pub unique: usize,
    /// Distinct values as a share of all rows.
    pub unique_share: f64,
}

/// Zero-value statistics for a flagged numeric column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZeroShare {
    /// Column name.
    pub name: String,
    /// Number of exact zeros among non-missing values.
    pub zero_count: usize,
    /// Zeros as a share of non-missing values, 1.0 for an all-zero column.
    pub zero_share: f64,
}

/// Composite data-quality report: four detector outcomes and a single score.
///
/// Detail lists are in table column order, so repeated runs over the same
/// table produce identical reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityFlags {
    /// Overall score in [0, 1]; 1.0 means no detector triggered on fully
    /// observed data.
    pub quality_score: f64,
    /// True if at least one column is constant.
    pub has_constant_columns: bool,
    /// Names of columns with at most one distinct non-missing value.
    pub constant_columns: Vec<String>,
    /// True if at least one ID-like column contains duplicates.
    pub has_suspicious_id_duplicates: bool,
    /// Every matched ID-like column with a nonzero duplicate rate.
    pub id_duplicates_info: Vec<IdDuplicates>,
    /// True if at least one categorical column exceeds the cardinality
    /// threshold.
    pub has_high_cardinality_categoricals: bool,
    /// Every flagged high-cardinality categorical column.
    pub high_cardinality_columns: Vec<HighCardinality>,
    /// True if at least one numeric column exceeds the zero-share threshold.
    pub has_many_zero_values: bool,
    /// Every flagged zero-dominated numeric column.
    pub many_zero_columns: Vec<ZeroShare>,
}

impl QualityFlags {
    /// Returns true if any detector triggered.
    pub fn has_issues(&self) -> bool {
        self.has_constant_columns
            || self.has_suspicious_id_duplicates
            || self.has_high_cardinality_categoricals
            || self.has_many_zero_values
    }

    /// Returns how many of the four detectors triggered.
    pub fn triggered_detectors(&self) -> usize {
        usize::from(self.has_constant_columns)
            + usize::from(self.has_suspicious_id_duplicates)
            + usize::from(self.has_high_cardinality_categoricals)
            + usize::from(self.has_many_zero_values)
    }
}
