//! Property-based tests using proptest
//!
//! These tests verify mathematical properties and invariants that should
//! always hold regardless of the input values.

use recall_eval::config::EvalConfig;
use recall_eval::evaluator::evaluate;
use recall_eval::index::GroundTruthIndex;
use recall_eval::matching::match_detections;
use recall_eval::metrics::iou::{calculate_iou, NO_OVERLAP};
use recall_eval::types::Rectangle;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn rect_strategy() -> impl Strategy<Value = Rectangle> {
    (0.0f64..100.0, 0.0f64..100.0, 0.0f64..50.0, 0.0f64..50.0)
        .prop_map(|(x, y, w, h)| Rectangle::new(x, y, x + w, y + h))
}

fn any_rect_strategy() -> impl Strategy<Value = Rectangle> {
    (-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0)
        .prop_map(|(a, b, c, d)| Rectangle::new(a, b, c, d))
}

// Property: IoU of a valid box with itself is exactly 1
proptest! {
    #[test]
    fn prop_iou_self_is_one(rect in rect_strategy()) {
        prop_assert_eq!(calculate_iou(&rect, &rect), 1.0);
    }
}

// Property: IoU is symmetric
proptest! {
    #[test]
    fn prop_iou_symmetric(a in any_rect_strategy(), b in any_rect_strategy()) {
        let iou1 = calculate_iou(&a, &b);
        let iou2 = calculate_iou(&b, &a);
        prop_assert_eq!(iou1, iou2, "IoU should be symmetric");
    }
}

// Property: IoU is either the sentinel or in (0, 1], even for inverted input
proptest! {
    #[test]
    fn prop_iou_range(a in any_rect_strategy(), b in any_rect_strategy()) {
        let iou = calculate_iou(&a, &b);
        prop_assert!(
            iou == NO_OVERLAP || (iou > 0.0 && iou <= 1.0 + 1e-12),
            "IoU should be -1 or in (0,1], got {}", iou
        );
    }
}

// Property: boxes separated by more than a pixel never overlap
proptest! {
    #[test]
    fn prop_separated_boxes_do_not_overlap(a in rect_strategy(), gap in 1.5f64..100.0) {
        let shifted = Rectangle::new(
            a.xmax + gap,
            a.ymin,
            a.xmax + gap + (a.xmax - a.xmin),
            a.ymax,
        );
        prop_assert_eq!(calculate_iou(&a, &shifted), NO_OVERLAP);
    }
}

// Property: each ground truth box yields at most one true positive
proptest! {
    #[test]
    fn prop_true_positives_bounded(
        gt in prop::collection::vec(rect_strategy(), 0..20),
        dr in prop::collection::vec(rect_strategy(), 0..40),
        min_overlap in 0.05f64..=1.0,
    ) {
        let config = EvalConfig::new(min_overlap).unwrap();
        let mut index = GroundTruthIndex::from_rects(gt.iter().copied());
        let matches = match_detections(&mut index, &dr, &config);

        let true_positives = matches.iter().filter(|m| m.is_true_positive()).count();
        prop_assert_eq!(true_positives, index.used_count());
        prop_assert!(true_positives <= gt.len());
        prop_assert_eq!(index.len(), gt.len());
        for m in matches.iter().filter(|m| m.is_true_positive()) {
            prop_assert!(m.iou >= min_overlap);
        }
    }
}

// Property: recall stays in [0, 1] and the average is pooled
proptest! {
    #[test]
    fn prop_average_is_pooled(
        images in prop::collection::vec(
            (prop::collection::vec(rect_strategy(), 1..8), prop::collection::vec(rect_strategy(), 0..8)),
            1..6,
        ),
    ) {
        let mut gt = BTreeMap::new();
        let mut dr = BTreeMap::new();
        for (i, (g, d)) in images.into_iter().enumerate() {
            gt.insert(format!("img{i}"), g);
            dr.insert(format!("img{i}"), d);
        }

        let report = evaluate(&gt, &dr, &EvalConfig::new(0.5).unwrap()).unwrap();
        for image in report.images() {
            let recall = image.recall().unwrap();
            prop_assert!((0.0..=1.0).contains(&recall));
        }

        let expected = report.total_true_positives() as f64 / report.total_ground_truths() as f64;
        prop_assert_eq!(report.average_recall().unwrap(), expected);
    }
}
