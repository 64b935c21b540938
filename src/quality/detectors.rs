//! Quality detectors and the heuristics runner.

use crate::{
    column::{share, DtypeKind},
    missing::MissingTable,
    summary::DatasetSummary,
};

use super::{
    flags::{HighCardinality, IdDuplicates, QualityFlags, ZeroShare},
    scoring::PenaltyWeights,
};

/// Threshold configuration for the quality detectors.
#[derive(Debug, Clone, Copy)]
pub struct QualityThresholds {
    /// A categorical column is high-cardinality when its distinct-value
    /// share of all rows exceeds this (default 0.5).
    pub max_category_unique_share: f64,
    /// A numeric column has excess zeros when its zero share of non-missing
    /// values exceeds this (default 0.5).
    pub max_zero_share: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            max_category_unique_share: 0.5,
            max_zero_share: 0.5,
        }
    }
}

type IdMatcher = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Matches column names that look like identifiers.
///
/// The default rule used by [`QualityHeuristics::new`]: the lowercase name
/// contains `"id"`.
pub fn default_id_matcher(name: &str) -> bool {
    name.to_ascii_lowercase().contains("id")
}

/// Configurable runner for the quality detectors.
///
/// Builder-style configuration over [`QualityThresholds`], the ID-name
/// predicate, and the scoring [`PenaltyWeights`].
///
/// # Example
///
/// ```no_run
/// use resumen::{missing_table, summarize_dataset, QualityHeuristics, Table};
///
/// let table = Table::from_csv("data/users.csv").unwrap();
/// let summary = summarize_dataset(&table).unwrap();
/// let missing = missing_table(&table);
///
/// let flags = QualityHeuristics::new()
///     .max_zero_share(0.9)
///     .with_id_matcher(|name| name.ends_with("_key"))
///     .compute(&summary, &missing);
/// ```
pub struct QualityHeuristics {
    thresholds: QualityThresholds,
    weights: PenaltyWeights,
    id_matcher: IdMatcher,
}

impl Default for QualityHeuristics {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityHeuristics {
    /// Creates a runner with default thresholds, weights, and ID matcher.
    pub fn new() -> Self {
        Self {
            thresholds: QualityThresholds::default(),
            weights: PenaltyWeights::default(),
            id_matcher: Box::new(default_id_matcher),
        }
    }

    /// Sets the high-cardinality unique-share threshold.
    #[must_use]
    pub fn max_category_unique_share(mut self, share: f64) -> Self {
        self.thresholds.max_category_unique_share = share;
        self
    }

    /// Sets the excess-zero share threshold.
    #[must_use]
    pub fn max_zero_share(mut self, share: f64) -> Self {
        self.thresholds.max_zero_share = share;
        self
    }

    /// Replaces the whole threshold configuration.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: QualityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Replaces the scoring weights.
    #[must_use]
    pub fn with_weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Replaces the ID-likeness predicate.
    #[must_use]
    pub fn with_id_matcher(mut self, matcher: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.id_matcher = Box::new(matcher);
        self
    }

    /// Runs every detector and derives the quality score.
    ///
    /// Pure function of its inputs: no state survives the call, and the
    /// same summary and missing table always produce the same flags.
    pub fn compute(&self, summary: &DatasetSummary, missing: &MissingTable) -> QualityFlags {
        let n_rows = summary.n_rows;

        let mut constant_columns = Vec::new();
        let mut id_duplicates_info = Vec::new();
        let mut high_cardinality_columns = Vec::new();
        let mut many_zero_columns = Vec::new();

        for column in &summary.columns {
            if n_rows > 0 && column.is_constant() {
                constant_columns.push(column.name.clone());
            }

            if n_rows > 0 && (self.id_matcher)(&column.name) {
                let duplicate_count = n_rows - column.unique_count.min(n_rows);
                let duplicate_rate = share(duplicate_count, n_rows);
                if duplicate_rate > 0.0 {
                    id_duplicates_info.push(IdDuplicates {
                        name: column.name.clone(),
                        duplicate_count,
                        duplicate_rate,
                    });
                }
            }

            match column.dtype {
                DtypeKind::Categorical => {
                    if n_rows > 0 {
                        let unique_share = share(column.unique_count, n_rows);
                        if unique_share > self.thresholds.max_category_unique_share {
                            high_cardinality_columns.push(HighCardinality {
                                name: column.name.clone(),
                                unique: column.unique_count,
                                unique_share,
                            });
                        }
                    }
                }
                DtypeKind::Numeric => {
                    if let Some(stats) = &column.numeric {
                        let zero_share = share(stats.zero_count, column.count);
                        if zero_share > self.thresholds.max_zero_share {
                            many_zero_columns.push(ZeroShare {
                                name: column.name.clone(),
                                zero_count: stats.zero_count,
                                zero_share,
                            });
                        }
                    }
                }
            }
        }

        let affected = [
            constant_columns.len(),
            id_duplicates_info.len(),
            high_cardinality_columns.len(),
            many_zero_columns.len(),
        ];
        let quality_score =
            self.weights
                .score(summary.n_cols, &affected, missing.avg_missing_share());

        QualityFlags {
            quality_score,
            has_constant_columns: !constant_columns.is_empty(),
            constant_columns,
            has_suspicious_id_duplicates: !id_duplicates_info.is_empty(),
            id_duplicates_info,
            has_high_cardinality_categoricals: !high_cardinality_columns.is_empty(),
            high_cardinality_columns,
            has_many_zero_values: !many_zero_columns.is_empty(),
            many_zero_columns,
        }
    }
}

/// Runs the quality detectors with default configuration.
///
/// Convenience wrapper over [`QualityHeuristics::new`].
pub fn compute_quality_flags(summary: &DatasetSummary, missing: &MissingTable) -> QualityFlags {
    QualityHeuristics::new().compute(summary, missing)
}
