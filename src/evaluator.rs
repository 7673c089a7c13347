//! Main evaluation orchestrator for recall runs.

use crate::config::EvalConfig;
use crate::error::{RecallEvalError, Result};
use crate::index::{GroundTruthIndex, ImageMatchState};
use crate::loader::{check_counterparts, discover_files, load_detections, load_from_file};
use crate::matching::{match_detection, MatchOutcome};
use crate::metrics::recall::RecallAggregator;
use crate::report::RecallReport;
use crate::stats::MatchStats;
use crate::types::{DetectionRecord, ParsedBox, Rectangle};
use std::collections::BTreeMap;
use std::path::Path;

/// State of one recall run: the ground truth of every image, loaded up front,
/// plus the counts accumulated as detection files are processed.
///
/// Ground truth boxes are consumed as detections match them, so a run is
/// single-use and detections must be fed in the intended order.
#[derive(Debug)]
pub struct RecallRun {
    config: EvalConfig,
    state: ImageMatchState,
    aggregator: RecallAggregator,
    stats: MatchStats,
}

impl RecallRun {
    /// Start a run over fully loaded ground truth.
    pub fn new(config: EvalConfig, state: ImageMatchState) -> Self {
        let mut aggregator = RecallAggregator::new();
        for (image_id, index) in state.iter() {
            aggregator.register_image(image_id, index.len());
        }

        Self {
            config,
            state,
            aggregator,
            stats: MatchStats::new(),
        }
    }

    /// Match one image's detections in order.
    ///
    /// # Returns
    ///
    /// Returns the number of true positives found for the image by this call.
    ///
    /// # Errors
    ///
    /// Returns [`RecallEvalError::MissingCounterpart`] if the run has no ground
    /// truth for `image_id`.
    pub fn process_image(&mut self, image_id: &str, detections: &[DetectionRecord]) -> Result<usize> {
        let index = self
            .state
            .get_mut(image_id)
            .ok_or_else(|| RecallEvalError::MissingCounterpart {
                image_id: image_id.to_string(),
                expected: "ground truth".to_string(),
            })?;

        let mut true_positives = 0;
        for detection in detections {
            let m = match_detection(index, &detection.rect, &self.config);
            tracing::debug!(
                "{}: detection '{}' best box {:?} iou {:.4} -> {:?}",
                image_id,
                detection.label,
                m.ground_truth_idx,
                m.iou,
                m.outcome
            );

            self.stats.record(m.outcome);
            if m.outcome == MatchOutcome::TruePositive {
                self.aggregator.record_true_positive(image_id);
                true_positives += 1;
            }
        }
        self.stats.record_image(detections.len());

        tracing::info!("True positive for {} is {}", image_id, true_positives);
        Ok(true_positives)
    }

    /// Ground truth state, including which boxes have been used so far.
    pub fn state(&self) -> &ImageMatchState {
        &self.state
    }

    /// Finish the run and hand back its report.
    pub fn finish(self) -> RecallReport {
        for image in self.aggregator.images() {
            if image.ground_truth_count == 0 {
                tracing::warn!("{} has no ground truth boxes, its recall is undefined", image.image_id);
            }
        }
        tracing::debug!("{}", self.stats.summary_string());

        RecallReport::new(self.config.min_overlap(), self.aggregator, self.stats)
    }
}

/// Evaluate recall over in-memory boxes.
///
/// Both maps are keyed by image identifier and must have the same keys.
/// Images are processed in identifier order, each image's detections in the
/// order given.
///
/// # Arguments
///
/// * `ground_truth` - Reference boxes per image
/// * `detections` - Detected boxes per image
/// * `config` - Overlap threshold and tie-break policy
///
/// # Errors
///
/// Returns `EmptyInput` if there is no ground truth image and
/// `MissingCounterpart` if an identifier appears in only one map.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use recall_eval::config::EvalConfig;
/// use recall_eval::evaluator::evaluate;
/// use recall_eval::types::Rectangle;
///
/// let mut ground_truth = BTreeMap::new();
/// ground_truth.insert("img1".to_string(), vec![Rectangle::new(10.0, 10.0, 50.0, 50.0)]);
/// let mut detections = BTreeMap::new();
/// detections.insert("img1".to_string(), vec![Rectangle::new(12.0, 12.0, 48.0, 48.0)]);
///
/// let report = evaluate(&ground_truth, &detections, &EvalConfig::new(0.5).unwrap()).unwrap();
/// assert_eq!(report.average_recall().unwrap(), 1.0);
/// ```
pub fn evaluate(
    ground_truth: &BTreeMap<String, Vec<Rectangle>>,
    detections: &BTreeMap<String, Vec<Rectangle>>,
    config: &EvalConfig,
) -> Result<RecallReport> {
    if ground_truth.is_empty() {
        return Err(RecallEvalError::EmptyInput(
            "no ground truth images given".to_string(),
        ));
    }

    if let Some(image_id) = first_unpaired(ground_truth, detections) {
        return Err(RecallEvalError::MissingCounterpart {
            image_id: image_id.to_string(),
            expected: "detection results".to_string(),
        });
    }
    if let Some(image_id) = first_unpaired(detections, ground_truth) {
        return Err(RecallEvalError::MissingCounterpart {
            image_id: image_id.to_string(),
            expected: "ground truth".to_string(),
        });
    }

    let mut state = ImageMatchState::new();
    for (image_id, rects) in ground_truth {
        state.insert(image_id.clone(), GroundTruthIndex::from_rects(rects.iter().copied()));
    }

    let mut run = RecallRun::new(*config, state);
    for (image_id, rects) in detections {
        let records: Vec<DetectionRecord> = rects
            .iter()
            .map(|rect| DetectionRecord::new(image_id.clone(), ParsedBox::new(*rect, "")))
            .collect();
        run.process_image(image_id, &records)?;
    }

    Ok(run.finish())
}

/// Evaluate recall over a ground truth directory and a detection results directory.
///
/// Every ground truth file is loaded before the first detection file is read.
/// Detection files are then processed in identifier order.
///
/// # Errors
///
/// Returns `EmptyInput` if the ground truth directory has no record file,
/// `MissingCounterpart` if the two directories do not pair up, `FormatError`
/// for a malformed line, and I/O errors from reading files.
pub fn evaluate_directories<P, Q>(
    ground_truth_dir: P,
    detections_dir: Q,
    config: &EvalConfig,
) -> Result<RecallReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let ground_truth_dir = ground_truth_dir.as_ref();
    let detections_dir = detections_dir.as_ref();

    let ground_truth_files = discover_files(ground_truth_dir)?;
    if ground_truth_files.is_empty() {
        return Err(RecallEvalError::EmptyInput(format!(
            "no ground truth files found in {}",
            ground_truth_dir.display()
        )));
    }
    let detection_files = discover_files(detections_dir)?;
    check_counterparts(
        &ground_truth_files,
        ground_truth_dir,
        &detection_files,
        detections_dir,
    )?;

    tracing::info!(
        "Evaluating {} images with minimum overlap {}",
        ground_truth_files.len(),
        config.min_overlap()
    );

    let mut state = ImageMatchState::new();
    for (image_id, path) in &ground_truth_files {
        let boxes = load_from_file(path)?;
        tracing::debug!("Loaded {} ground truth boxes for {}", boxes.len(), image_id);
        state.insert(image_id.clone(), GroundTruthIndex::new(boxes));
    }

    let mut run = RecallRun::new(*config, state);
    for (image_id, path) in &detection_files {
        let detections = load_detections(path, image_id)?;
        run.process_image(image_id, &detections)?;
    }

    Ok(run.finish())
}

fn first_unpaired<'a, A, B>(
    left: &'a BTreeMap<String, A>,
    right: &BTreeMap<String, B>,
) -> Option<&'a str> {
    left.keys()
        .find(|image_id| !right.contains_key(*image_id))
        .map(String::as_str)
}
