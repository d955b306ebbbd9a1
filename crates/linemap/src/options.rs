use crate::error::{Error, Result};
use linemap_geom::Precision;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    /// Tolerance for endpoint coincidence and degeneracy, and the canonical key grid.
    pub precision: Precision,
    /// Extra splits allowed per input segment on top of one per segment pair.
    pub split_budget_factor: usize,
    /// Absolute split cap; overrides the computed budget when set.
    pub max_splits: Option<usize>,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            split_budget_factor: 8,
            max_splits: None,
        }
    }
}

impl BuilderOptions {
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_max_splits(mut self, max_splits: usize) -> Self {
        self.max_splits = Some(max_splits);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_splits.is_none() && self.split_budget_factor == 0 {
            return Err(Error::InvalidOptions {
                message: "split_budget_factor must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Maximum number of splits the planar builder may perform for `segments` inputs.
    ///
    /// `n` segments cross in at most `n * (n - 1) / 2` points; the per-segment allowance absorbs
    /// re-splits of pieces produced by earlier splits.
    pub fn split_budget(&self, segments: usize) -> usize {
        if let Some(max) = self.max_splits {
            return max;
        }
        let pairs = segments.saturating_mul(segments.saturating_sub(1)) / 2;
        pairs.saturating_add(self.split_budget_factor.saturating_mul(segments))
    }
}
