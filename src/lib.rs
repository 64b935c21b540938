//! resumen - Dataset Summaries and Quality Diagnostics in Pure Rust
//!
//! A fast, deterministic first pass over an unfamiliar tabular dataset:
//! per-column statistics, a missing-value report, a correlation matrix,
//! categorical frequency tables, and a composite set of quality flags
//! culminating in a single quality score.
//!
//! # Design Principles
//!
//! 1. **Pure core** - every analyzer is a synchronous function from an
//!    in-memory table to an in-memory report; no I/O, no shared state
//! 2. **Pure Rust** - no Python, no FFI
//! 3. **Ecosystem aligned** - Arrow 53, Parquet 53; tables are Arrow
//!    `RecordBatch`es throughout
//!
//! # Quick Start
//!
//! ```no_run
//! use resumen::{compute_quality_flags, missing_table, summarize_dataset, Table};
//!
//! // Load a CSV file
//! let table = Table::from_csv("data/users.csv").unwrap();
//!
//! // Profile every column
//! let summary = summarize_dataset(&table).unwrap();
//! let missing = missing_table(&table);
//!
//! // Derive quality flags and a single score
//! let flags = compute_quality_flags(&summary, &missing);
//! println!("quality score: {:.2}", flags.quality_score);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_lossless,
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp,
        clippy::too_many_lines
    )
)]
// Allow some pedantic lints for cleaner code
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::map_unwrap_or)]

pub mod categories;
pub mod column;
pub mod correlation;
pub mod error;
pub mod missing;
pub mod quality;
pub mod summary;
pub mod table;

/// CLI module for command-line interface
#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use categories::{top_categories, CategoryCount, FrequencyTable};
pub use column::DtypeKind;
pub use correlation::{correlation_matrix, CorrelationMatrix};
pub use error::{Error, Result};
pub use missing::{missing_table, MissingEntry, MissingTable};
pub use quality::{
    compute_quality_flags, default_id_matcher, HighCardinality, IdDuplicates, PenaltyWeights,
    QualityFlags, QualityHeuristics, QualityThresholds, ZeroShare,
};
pub use summary::{
    flatten_summary_for_print, summarize_dataset, CategoricalSummary, ColumnSummary,
    DatasetSummary, NumericSummary, SummaryRow,
};
pub use table::{CsvOptions, JsonOptions, Table};
