//! Data-quality heuristics over a dataset summary.
//!
//! Four independent detectors inspect a [`DatasetSummary`](crate::DatasetSummary)
//! and a [`MissingTable`](crate::MissingTable):
//!
//! - constant columns (`unique_count <= 1`, all-missing included)
//! - suspicious duplicates in ID-like columns (name-matched, swappable
//!   predicate)
//! - high-cardinality categorical columns (unique share above a threshold)
//! - numeric columns dominated by zeros (zero share above a threshold)
//!
//! Each detector yields a boolean plus a detail list, and the triggered
//! detectors feed a single quality score in [0, 1] — 1.0 means nothing was
//! detected on fully observed data.
//!
//! # Example
//!
//! ```no_run
//! use resumen::{compute_quality_flags, missing_table, summarize_dataset, Table};
//!
//! let table = Table::from_csv("data/users.csv").unwrap();
//! let summary = summarize_dataset(&table).unwrap();
//! let missing = missing_table(&table);
//!
//! let flags = compute_quality_flags(&summary, &missing);
//! println!("quality score: {:.2}", flags.quality_score);
//! ```

mod detectors;
mod flags;
mod scoring;


pub use detectors::{
    compute_quality_flags, default_id_matcher, QualityHeuristics, QualityThresholds,
};
pub use flags::{HighCardinality, IdDuplicates, QualityFlags, ZeroShare};
pub use scoring::PenaltyWeights;
