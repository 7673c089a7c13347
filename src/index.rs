//! Per-image ground truth state for a single run.

use crate::types::{GroundTruthBox, ParsedBox, Rectangle};
use std::collections::BTreeMap;

/// Ground truth boxes of one image, in file order, each with a `used` flag.
///
/// Boxes are never removed, so the original count stays available after
/// matching has consumed some of them.
#[derive(Debug, Clone, Default)]
pub struct GroundTruthIndex {
    boxes: Vec<GroundTruthBox>,
}

impl GroundTruthIndex {
    /// Build an index with every box unused.
    pub fn new(records: impl IntoIterator<Item = ParsedBox>) -> Self {
        Self {
            boxes: records.into_iter().map(GroundTruthBox::from).collect(),
        }
    }

    /// Build an index from bare rectangles with empty labels.
    pub fn from_rects(rects: impl IntoIterator<Item = Rectangle>) -> Self {
        Self::new(rects.into_iter().map(|rect| ParsedBox::new(rect, "")))
    }

    /// Iterate the boxes in file order.
    pub fn iter(&self) -> impl Iterator<Item = &GroundTruthBox> {
        self.boxes.iter()
    }

    pub fn get(&self, idx: usize) -> Option<&GroundTruthBox> {
        self.boxes.get(idx)
    }

    /// Mark a box as used. Returns `false` if it already was, or the index is out of range.
    pub fn mark_used(&mut self, idx: usize) -> bool {
        match self.boxes.get_mut(idx) {
            Some(gt) if !gt.used => {
                gt.used = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_used(&self, idx: usize) -> bool {
        self.boxes.get(idx).is_some_and(|gt| gt.used)
    }

    /// Number of boxes loaded for the image, independent of consumption.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn used_count(&self) -> usize {
        self.boxes.iter().filter(|gt| gt.used).count()
    }
}

/// Ground truth indices of every image in a run, keyed by image identifier.
///
/// Iteration is in lexicographic identifier order.
#[derive(Debug, Clone, Default)]
pub struct ImageMatchState {
    images: BTreeMap<String, GroundTruthIndex>,
}

impl ImageMatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image. A second insert for the same identifier replaces the first.
    pub fn insert(&mut self, image_id: impl Into<String>, index: GroundTruthIndex) {
        self.images.insert(image_id.into(), index);
    }

    pub fn get(&self, image_id: &str) -> Option<&GroundTruthIndex> {
        self.images.get(image_id)
    }

    pub fn get_mut(&mut self, image_id: &str) -> Option<&mut GroundTruthIndex> {
        self.images.get_mut(image_id)
    }

    pub fn contains(&self, image_id: &str) -> bool {
        self.images.contains_key(image_id)
    }

    pub fn image_ids(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroundTruthIndex)> {
        self.images.iter().map(|(id, index)| (id.as_str(), index))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
