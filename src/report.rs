//! The result of a recall run and its text and JSON renderings.

use crate::error::Result;
use crate::metrics::recall::{ImageRecall, RecallAggregator};
use crate::stats::MatchStats;
use serde::Serialize;

/// Per-image counts and matching statistics of a completed run.
#[derive(Debug, Clone)]
pub struct RecallReport {
    pub min_overlap: f64,
    recall: RecallAggregator,
    pub stats: MatchStats,
}

impl RecallReport {
    pub fn new(min_overlap: f64, recall: RecallAggregator, stats: MatchStats) -> Self {
        Self {
            min_overlap,
            recall,
            stats,
        }
    }

    /// Images in lexicographic identifier order.
    pub fn images(&self) -> impl Iterator<Item = &ImageRecall> {
        self.recall.images()
    }

    pub fn image(&self, image_id: &str) -> Option<&ImageRecall> {
        self.recall.get(image_id)
    }

    pub fn total_true_positives(&self) -> usize {
        self.recall.total_true_positives()
    }

    pub fn total_ground_truths(&self) -> usize {
        self.recall.total_ground_truths()
    }

    /// Pooled recall across all images, see [`RecallAggregator::average_recall`].
    ///
    /// # Errors
    ///
    /// Returns `UndefinedRecall` if no image has a ground truth box.
    pub fn average_recall(&self) -> Result<f64> {
        self.recall.average_recall()
    }

    /// Render the plain text report.
    ///
    /// Images with an undefined recall are shown as `N/A`.
    ///
    /// # Errors
    ///
    /// Returns `UndefinedRecall` if the average itself is undefined.
    pub fn to_text(&self) -> Result<String> {
        let mut lines = vec!["file_name ----> recall value".to_string()];
        lines.extend(self.images().map(|image| {
            let recall = match image.recall() {
                Ok(recall) => recall.to_string(),
                Err(_) => "N/A".to_string(),
            };
            format!("{}  ---->  {}", image.image_id, recall)
        }));
        lines.push(format!("Average Recall value: {}", self.average_recall()?));

        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out)
    }

    /// Render the report as pretty-printed JSON.
    ///
    /// Undefined per-image recalls are `null`.
    ///
    /// # Errors
    ///
    /// Returns `UndefinedRecall` if the average is undefined, or a JSON error.
    pub fn to_json(&self) -> Result<String> {
        let summary = JsonReport {
            min_overlap: self.min_overlap,
            images: self
                .images()
                .map(|image| JsonImage {
                    image_id: &image.image_id,
                    true_positives: image.true_positives,
                    ground_truth_count: image.ground_truth_count,
                    recall: image.recall().ok(),
                })
                .collect(),
            average_recall: self.average_recall()?,
            stats: &self.stats,
        };
        Ok(serde_json::to_string_pretty(&summary)?)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    min_overlap: f64,
    images: Vec<JsonImage<'a>>,
    average_recall: f64,
    stats: &'a MatchStats,
}

#[derive(Serialize)]
struct JsonImage<'a> {
    image_id: &'a str,
    true_positives: usize,
    ground_truth_count: usize,
    recall: Option<f64>,
}
