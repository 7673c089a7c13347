//! Evaluation configuration: the overlap threshold and the tie-break policy.

use crate::error::{RecallEvalError, Result};
use serde::{Deserialize, Serialize};

/// Default minimum overlap used by the command line tool.
pub const DEFAULT_MIN_OVERLAP: f64 = 0.7;

/// How the matcher resolves ground truth boxes that share the maximum IoU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Keep the first box reaching the maximum, in file order.
    #[default]
    FirstSeen,
    /// Let a later unused box replace an earlier used one with the same IoU.
    PreferUnused,
}

/// Parameters of a single recall run.
///
/// Construct through [`EvalConfig::new`] so the threshold is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvalConfig {
    min_overlap: f64,
    tie_break: TieBreak,
}

impl EvalConfig {
    /// Create a configuration with the default tie-break policy.
    ///
    /// # Errors
    ///
    /// Returns [`RecallEvalError::InvalidThreshold`] if `min_overlap` is not in `(0.0, 1.0]`.
    ///
    /// # Example
    ///
    /// ```
    /// use recall_eval::config::EvalConfig;
    ///
    /// assert!(EvalConfig::new(0.5).is_ok());
    /// assert!(EvalConfig::new(0.0).is_err());
    /// assert!(EvalConfig::new(1.5).is_err());
    /// ```
    pub fn new(min_overlap: f64) -> Result<Self> {
        validate_threshold(min_overlap)?;
        Ok(Self {
            min_overlap,
            tie_break: TieBreak::default(),
        })
    }

    /// Replace the tie-break policy.
    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn min_overlap(&self) -> f64 {
        self.min_overlap
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }
}

/// Validate that a threshold is in the range (0.0, 1.0].
///
/// NaN is rejected as well.
fn validate_threshold(threshold: f64) -> Result<()> {
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(RecallEvalError::InvalidThreshold(format!(
            "min overlap must be greater than 0.0 and at most 1.0, got {}",
            threshold
        )));
    }
    Ok(())
}
