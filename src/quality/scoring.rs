//! Quality score computation.
//!
//! The score starts at 1.0 and pays a penalty for every triggered detector
//! plus a penalty proportional to the average missing share. Each triggered
//! detector costs at least `detector_base`, so the score strictly decreases
//! as more detectors trigger; the `detector_share` term makes it strictly
//! decrease again as more columns are affected.

use serde::{Deserialize, Serialize};

/// Named penalty weights for the quality score.
///
/// Exposed so tests and callers can probe boundary behavior with explicit
/// constants instead of inlined literals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PenaltyWeights {
    /// Flat cost of a triggered detector (default 0.10).
    pub detector_base: f64,
    /// Additional cost scaled by the affected-column share (default 0.10).
    pub detector_share: f64,
    /// Cost scaled by the average per-column missing share (default 0.30).
    pub missing_weight: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            detector_base: 0.10,
            detector_share: 0.10,
            missing_weight: 0.30,
        }
    }
}

impl PenaltyWeights {
    /// Computes the quality score for a dataset of `n_cols` columns.
    ///
    /// `affected` holds the number of affected columns per detector (zero
    /// means the detector did not trigger); `avg_missing_share` is the mean
    /// per-column missing share. The result is clamped to [0, 1].
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self, n_cols: usize, affected: &[usize], avg_missing_share: f64) -> f64 {
        let mut score = 1.0;

        if n_cols > 0 {
            for &count in affected {
                if count == 0 {
                    continue;
                }
                score -= self.detector_base
                    + self.detector_share * (count as f64 / n_cols as f64);
            }
        }

        score -= self.missing_weight * avg_missing_share;
        score.clamp(0.0, 1.0)
    }
}
