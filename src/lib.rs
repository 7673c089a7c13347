//! # recall-eval
//!
//! A Rust library for measuring object detection recall by matching detected
//! bounding boxes against ground truth with an IoU threshold.
//!
//! ## Features
//!
//! - Parse per-image record files (`xmin,ymin,x,y,xmax,ymax,x,y,label`)
//! - Calculate IoU with the inclusive pixel convention
//! - Greedy matching where each ground truth box can be claimed only once
//! - Per-image recall and pooled average recall
//! - Text and JSON reports with per-detection matching statistics
//!
//! ## Quick Start
//!
//! ```rust
//! use recall_eval::config::EvalConfig;
//! use recall_eval::evaluator::evaluate_directories;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EvalConfig::new(0.7)?;
//!
//! // Evaluate a ground truth / detection directory pair (in actual use)
//! // let report = evaluate_directories("input/ground-truth", "input/detection-results", &config)?;
//!
//! // Print results
//! // print!("{}", report.to_text()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Matching Rules
//!
//! Detections are matched in file order. Each detection picks the ground
//! truth box with the highest IoU, whether or not that box is already used.
//! It is a true positive only if that IoU reaches the threshold and the box
//! is still unused, in which case the box becomes used.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod index;
pub mod loader;
pub mod matching;
pub mod metrics;
pub mod report;
pub mod stats;
pub mod types;

// Re-export commonly used types and functions
pub use config::{EvalConfig, TieBreak};
pub use error::{RecallEvalError, Result};
pub use evaluator::{evaluate, evaluate_directories, RecallRun};
pub use index::{GroundTruthIndex, ImageMatchState};
pub use matching::{match_detection, Match, MatchOutcome};
pub use metrics::{calculate_iou, ImageRecall, RecallAggregator, NO_OVERLAP};
pub use report::RecallReport;
pub use types::{DetectionRecord, GroundTruthBox, ParsedBox, Rectangle};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_compiles() {
        // Basic smoke test to ensure the library compiles
        let rect = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.is_valid());
    }
}
