//! Edge case tests for matching order, tie-breaks and degenerate boxes.

use recall_eval::config::{EvalConfig, TieBreak};
use recall_eval::evaluator::evaluate;
use recall_eval::index::GroundTruthIndex;
use recall_eval::matching::{match_detection, match_detections, MatchOutcome};
use recall_eval::metrics::iou::{calculate_iou, NO_OVERLAP};
use recall_eval::types::Rectangle;
use std::collections::BTreeMap;

fn single(image_id: &str, rects: Vec<Rectangle>) -> BTreeMap<String, Vec<Rectangle>> {
    let mut map = BTreeMap::new();
    map.insert(image_id.to_string(), rects);
    map
}

fn config(min_overlap: f64) -> EvalConfig {
    EvalConfig::new(min_overlap).unwrap()
}

#[test]
fn test_empty_detections_with_ground_truth() {
    let gt = single(
        "img",
        vec![
            Rectangle::new(0.0, 0.0, 10.0, 10.0),
            Rectangle::new(20.0, 20.0, 30.0, 30.0),
            Rectangle::new(40.0, 40.0, 50.0, 50.0),
        ],
    );
    let dr = single("img", vec![]);

    let report = evaluate(&gt, &dr, &config(0.5)).unwrap();
    assert_eq!(report.image("img").unwrap().recall().unwrap(), 0.0);
}

#[test]
fn test_empty_ground_truth_with_detections() {
    let gt = single("img", vec![]);
    let dr = single("img", vec![Rectangle::new(0.0, 0.0, 10.0, 10.0)]);

    let report = evaluate(&gt, &dr, &config(0.5)).unwrap();
    assert!(report.image("img").unwrap().recall().is_err());
    assert_eq!(report.stats.no_ground_truth, 1);
}

#[test]
fn test_order_decides_which_detection_counts() {
    // A loose detection listed first takes the box from a tighter one listed later.
    let gt = single("img", vec![Rectangle::new(0.0, 0.0, 99.0, 99.0)]);
    let loose = Rectangle::new(10.0, 10.0, 99.0, 99.0);
    let tight = Rectangle::new(0.0, 0.0, 99.0, 99.0);

    let report = evaluate(&gt, &single("img", vec![loose, tight]), &config(0.5)).unwrap();
    assert_eq!(report.image("img").unwrap().true_positives, 1);
    assert_eq!(report.stats.already_matched, 1);
}

#[test]
fn test_greedy_is_not_optimal() {
    // Detection 0 prefers box 0, which detection 1 also needed most.
    // A global assignment would give two matches; greedy gives one.
    let mut index = GroundTruthIndex::from_rects([
        Rectangle::new(0.0, 0.0, 9.0, 9.0),
        Rectangle::new(3.0, 0.0, 12.0, 9.0),
    ]);
    let detections = [
        Rectangle::new(1.0, 0.0, 10.0, 9.0),
        Rectangle::new(0.0, 0.0, 9.0, 9.0),
    ];

    let matches = match_detections(&mut index, &detections, &config(0.6));
    assert_eq!(matches[0].ground_truth_idx, Some(0));
    assert!(matches[0].is_true_positive());
    assert_eq!(matches[1].ground_truth_idx, Some(0));
    assert_eq!(matches[1].outcome, MatchOutcome::AlreadyMatched);
    assert!(!index.is_used(1));
}

#[test]
fn test_identical_ground_truth_boxes_first_seen() {
    let gt = single(
        "img",
        vec![Rectangle::new(0.0, 0.0, 10.0, 10.0), Rectangle::new(0.0, 0.0, 10.0, 10.0)],
    );
    let det = Rectangle::new(0.0, 0.0, 10.0, 10.0);

    let report = evaluate(&gt, &single("img", vec![det, det]), &config(0.5)).unwrap();
    // Both detections pick box 0, so only one counts.
    assert_eq!(report.image("img").unwrap().true_positives, 1);
}

#[test]
fn test_identical_ground_truth_boxes_prefer_unused() {
    let gt = single(
        "img",
        vec![Rectangle::new(0.0, 0.0, 10.0, 10.0), Rectangle::new(0.0, 0.0, 10.0, 10.0)],
    );
    let det = Rectangle::new(0.0, 0.0, 10.0, 10.0);
    let config = config(0.5).with_tie_break(TieBreak::PreferUnused);

    let report = evaluate(&gt, &single("img", vec![det, det]), &config).unwrap();
    assert_eq!(report.image("img").unwrap().true_positives, 2);
}

#[test]
fn test_degenerate_boxes_do_not_panic() {
    let point = Rectangle::new(5.0, 5.0, 5.0, 5.0);
    let inverted = Rectangle::new(10.0, 10.0, 0.0, 0.0);
    let normal = Rectangle::new(0.0, 0.0, 10.0, 10.0);

    // A single pixel is a valid box under the inclusive convention.
    assert!((calculate_iou(&point, &normal) - 1.0 / 121.0).abs() < 1e-12);
    assert_eq!(calculate_iou(&inverted, &normal), NO_OVERLAP);
    assert_eq!(calculate_iou(&inverted, &inverted), NO_OVERLAP);

    let mut index = GroundTruthIndex::from_rects([inverted]);
    let m = match_detection(&mut index, &normal, &config(0.1));
    assert_eq!(m.outcome, MatchOutcome::NoGroundTruth);
}

#[test]
fn test_fractional_coordinates() {
    let a = Rectangle::new(0.5, 0.5, 10.5, 10.5);
    let b = Rectangle::new(0.5, 0.5, 10.5, 10.5);
    assert_eq!(calculate_iou(&a, &b), 1.0);
}

#[test]
fn test_threshold_of_one_requires_exact_box() {
    let gt = single("img", vec![Rectangle::new(0.0, 0.0, 10.0, 10.0)]);

    let near = single("img", vec![Rectangle::new(0.0, 0.0, 10.0, 9.0)]);
    let report = evaluate(&gt, &near, &config(1.0)).unwrap();
    assert_eq!(report.image("img").unwrap().true_positives, 0);
    assert_eq!(report.stats.below_threshold, 1);

    let exact = single("img", vec![Rectangle::new(0.0, 0.0, 10.0, 10.0)]);
    let report = evaluate(&gt, &exact, &config(1.0)).unwrap();
    assert_eq!(report.image("img").unwrap().true_positives, 1);
}

#[test]
fn test_detections_only_match_their_own_image() {
    let mut gt = BTreeMap::new();
    gt.insert("a".to_string(), vec![Rectangle::new(0.0, 0.0, 10.0, 10.0)]);
    gt.insert("b".to_string(), vec![Rectangle::new(100.0, 100.0, 110.0, 110.0)]);

    let mut dr = BTreeMap::new();
    dr.insert("a".to_string(), vec![Rectangle::new(100.0, 100.0, 110.0, 110.0)]);
    dr.insert("b".to_string(), vec![]);

    let report = evaluate(&gt, &dr, &config(0.5)).unwrap();
    assert_eq!(report.total_true_positives(), 0);
}
