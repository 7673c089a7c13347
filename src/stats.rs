//! Statistics tracking for detection matching
//!
//! Counts how each detection of a run was decided, so a low recall can be
//! traced back to missed overlaps, strict thresholds or duplicate detections.

use crate::matching::MatchOutcome;
use serde::{Deserialize, Serialize};

/// Counters collected while matching detections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    /// Total number of detections processed
    pub total_detections: usize,

    /// Detections counted as true positives
    pub true_positives: usize,

    /// Detections whose best box had already been taken
    pub already_matched: usize,

    /// Detections whose best IoU was under the threshold
    pub below_threshold: usize,

    /// Detections that overlapped no ground truth box
    pub no_ground_truth: usize,

    /// Number of images processed
    pub processed_images: usize,

    /// Number of images without any detection
    pub empty_detection_images: usize,
}

impl MatchStats {
    /// Create a new `MatchStats` with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one detection
    pub fn record(&mut self, outcome: MatchOutcome) {
        self.total_detections += 1;
        match outcome {
            MatchOutcome::TruePositive => self.true_positives += 1,
            MatchOutcome::AlreadyMatched => self.already_matched += 1,
            MatchOutcome::BelowThreshold => self.below_threshold += 1,
            MatchOutcome::NoGroundTruth => self.no_ground_truth += 1,
        }
    }

    /// Record a processed image and how many detections it had
    pub fn record_image(&mut self, detections: usize) {
        self.processed_images += 1;
        if detections == 0 {
            self.empty_detection_images += 1;
        }
    }

    /// Detections that did not count as true positives
    pub fn rejected(&self) -> usize {
        self.total_detections.saturating_sub(self.true_positives)
    }

    /// Get a formatted string summary of the statistics
    pub fn summary_string(&self) -> String {
        format!(
            "MatchStats {{ detections: {}, true_positives: {}, rejected: {}, processed_images: {}, empty: {} }}",
            self.total_detections,
            self.true_positives,
            self.rejected(),
            self.processed_images,
            self.empty_detection_images
        )
    }
}
