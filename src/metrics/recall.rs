//! Recall aggregation over images.

use crate::error::{RecallEvalError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Calculate recall from a true positive count and a ground truth count.
///
/// # Errors
///
/// Returns [`RecallEvalError::UndefinedRecall`] if `ground_truth_count` is zero.
///
/// # Example
///
/// ```
/// use recall_eval::metrics::recall::calculate_recall;
///
/// assert_eq!(calculate_recall("img1", 3, 4).unwrap(), 0.75);
/// assert!(calculate_recall("img2", 0, 0).is_err());
/// ```
pub fn calculate_recall(subject: &str, true_positives: usize, ground_truth_count: usize) -> Result<f64> {
    if ground_truth_count == 0 {
        return Err(RecallEvalError::UndefinedRecall(subject.to_string()));
    }
    Ok(true_positives as f64 / ground_truth_count as f64)
}

/// True positive and ground truth counts of a single image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecall {
    pub image_id: String,
    pub true_positives: usize,
    pub ground_truth_count: usize,
}

impl ImageRecall {
    /// Recall of this image.
    ///
    /// # Errors
    ///
    /// Returns [`RecallEvalError::UndefinedRecall`] if the image has no ground truth boxes.
    pub fn recall(&self) -> Result<f64> {
        calculate_recall(&self.image_id, self.true_positives, self.ground_truth_count)
    }
}

/// Accumulates per-image true positive counts against fixed ground truth totals.
#[derive(Debug, Clone, Default)]
pub struct RecallAggregator {
    images: BTreeMap<String, ImageRecall>,
}

impl RecallAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image with its loaded ground truth count.
    ///
    /// Registering an image again resets its true positive count.
    pub fn register_image(&mut self, image_id: &str, ground_truth_count: usize) {
        self.images.insert(
            image_id.to_string(),
            ImageRecall {
                image_id: image_id.to_string(),
                true_positives: 0,
                ground_truth_count,
            },
        );
    }

    /// Count one true positive for an image. Unregistered images are ignored.
    pub fn record_true_positive(&mut self, image_id: &str) {
        if let Some(image) = self.images.get_mut(image_id) {
            image.true_positives += 1;
        }
    }

    pub fn get(&self, image_id: &str) -> Option<&ImageRecall> {
        self.images.get(image_id)
    }

    /// Per-image results in identifier order.
    pub fn images(&self) -> impl Iterator<Item = &ImageRecall> {
        self.images.values()
    }

    pub fn total_true_positives(&self) -> usize {
        self.images.values().map(|image| image.true_positives).sum()
    }

    pub fn total_ground_truths(&self) -> usize {
        self.images.values().map(|image| image.ground_truth_count).sum()
    }

    /// Overall recall: total true positives over total ground truth boxes.
    ///
    /// This is pooled over boxes, not the mean of per-image recalls.
    ///
    /// # Errors
    ///
    /// Returns [`RecallEvalError::UndefinedRecall`] if no image has any ground truth box.
    pub fn average_recall(&self) -> Result<f64> {
        calculate_recall(
            "all images",
            self.total_true_positives(),
            self.total_ground_truths(),
        )
    }
}
