//! Greedy matching of detections against an image's ground truth boxes.

use crate::config::{EvalConfig, TieBreak};
use crate::index::GroundTruthIndex;
use crate::metrics::iou::{calculate_iou, NO_OVERLAP};
use crate::types::Rectangle;
use serde::Serialize;

/// Why a detection did or did not count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Best box met the threshold and was still unused.
    TruePositive,
    /// Best box met the threshold but an earlier detection had already taken it.
    AlreadyMatched,
    /// Best box overlapped, but less than the threshold.
    BelowThreshold,
    /// The image has no ground truth box overlapping the detection at all.
    NoGroundTruth,
}

/// Result of matching one detection.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Position of the best ground truth box in the image's index.
    pub ground_truth_idx: Option<usize>,
    /// IoU with that box, or [`NO_OVERLAP`].
    pub iou: f64,
    pub outcome: MatchOutcome,
}

impl Match {
    pub fn is_true_positive(&self) -> bool {
        self.outcome == MatchOutcome::TruePositive
    }
}

/// Find the ground truth box with the highest IoU against `detection`.
///
/// Used boxes take part in the search. Only a strictly greater IoU replaces
/// the current best, so with [`TieBreak::FirstSeen`] the first box reaching
/// the maximum wins; [`TieBreak::PreferUnused`] additionally lets an unused
/// box displace a used one with an equal IoU.
///
/// Returns `None` when no box overlaps.
pub fn find_best_match(
    index: &GroundTruthIndex,
    detection: &Rectangle,
    tie_break: TieBreak,
) -> Option<(usize, f64)> {
    let mut best_iou = NO_OVERLAP;
    let mut best_idx: Option<usize> = None;

    for (gt_idx, gt) in index.iter().enumerate() {
        let iou = calculate_iou(detection, &gt.rect);

        let replaces = iou > best_iou
            || (tie_break == TieBreak::PreferUnused
                && iou == best_iou
                && !gt.used
                && best_idx.is_some_and(|idx| index.is_used(idx)));

        if replaces {
            best_iou = iou;
            best_idx = Some(gt_idx);
        }
    }

    best_idx.map(|idx| (idx, best_iou))
}

/// Match one detection against an image's ground truth, consuming the chosen box on success.
///
/// # Arguments
///
/// * `index` - Ground truth of the detection's image
/// * `detection` - Detected rectangle
/// * `config` - Overlap threshold and tie-break policy
///
/// # Example
///
/// ```
/// use recall_eval::config::EvalConfig;
/// use recall_eval::index::GroundTruthIndex;
/// use recall_eval::matching::match_detection;
/// use recall_eval::types::Rectangle;
///
/// let config = EvalConfig::new(0.5).unwrap();
/// let mut index = GroundTruthIndex::from_rects([Rectangle::new(10.0, 10.0, 50.0, 50.0)]);
///
/// let first = match_detection(&mut index, &Rectangle::new(12.0, 12.0, 48.0, 48.0), &config);
/// let second = match_detection(&mut index, &Rectangle::new(11.0, 11.0, 49.0, 49.0), &config);
/// assert!(first.is_true_positive());
/// assert!(!second.is_true_positive());
/// ```
pub fn match_detection(
    index: &mut GroundTruthIndex,
    detection: &Rectangle,
    config: &EvalConfig,
) -> Match {
    let Some((gt_idx, iou)) = find_best_match(index, detection, config.tie_break()) else {
        return Match {
            ground_truth_idx: None,
            iou: NO_OVERLAP,
            outcome: MatchOutcome::NoGroundTruth,
        };
    };

    let outcome = if iou < config.min_overlap() {
        MatchOutcome::BelowThreshold
    } else if index.mark_used(gt_idx) {
        MatchOutcome::TruePositive
    } else {
        MatchOutcome::AlreadyMatched
    };

    Match {
        ground_truth_idx: Some(gt_idx),
        iou,
        outcome,
    }
}

/// Match an image's detections in order.
///
/// Returns one [`Match`] per detection, in the same order.
pub fn match_detections<'a>(
    index: &mut GroundTruthIndex,
    detections: impl IntoIterator<Item = &'a Rectangle>,
    config: &EvalConfig,
) -> Vec<Match> {
    detections
        .into_iter()
        .map(|detection| match_detection(index, detection, config))
        .collect()
}
