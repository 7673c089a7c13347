//! Metrics calculation modules for recall evaluation.

pub mod iou;
pub mod recall;

pub use iou::{calculate_iou, NO_OVERLAP};
pub use recall::{calculate_recall, ImageRecall, RecallAggregator};
