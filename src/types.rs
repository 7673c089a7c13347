//! Core data types for boxes and records.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixel units.
///
/// Coordinates are in XYXY format where:
/// - xmin, ymin: top-left corner
/// - xmax, ymax: bottom-right corner (inclusive)
///
/// Inverted or degenerate rectangles are representable; consumers treat
/// them as non-overlapping instead of rejecting them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Width counting both edge pixels.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin + 1.0
    }

    /// Height counting both edge pixels.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin + 1.0
    }

    /// Area using the inclusive pixel convention.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Check if the rectangle covers at least one pixel in each direction.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }
}

/// One parsed record line: a rectangle and its free-form label text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedBox {
    pub rect: Rectangle,
    pub label: String,
}

impl ParsedBox {
    pub fn new(rect: Rectangle, label: impl Into<String>) -> Self {
        Self {
            rect,
            label: label.into(),
        }
    }
}

/// A ground truth box together with its consumption flag.
///
/// `used` goes from `false` to `true` at most once during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruthBox {
    pub rect: Rectangle,
    pub label: String,
    pub used: bool,
}

impl From<ParsedBox> for GroundTruthBox {
    fn from(parsed: ParsedBox) -> Self {
        Self {
            rect: parsed.rect,
            label: parsed.label,
            used: false,
        }
    }
}

/// A detection box and the image it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRecord {
    pub image_id: String,
    pub rect: Rectangle,
    pub label: String,
}

impl DetectionRecord {
    pub fn new(image_id: impl Into<String>, parsed: ParsedBox) -> Self {
        Self {
            image_id: image_id.into(),
            rect: parsed.rect,
            label: parsed.label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_area() {
        let rect = Rectangle::new(0.0, 0.0, 9.0, 9.0);
        assert_eq!(rect.width(), 10.0);
        assert_eq!(rect.area(), 100.0);
        assert!(rect.is_valid());
    }

    #[test]
    fn test_inverted_rectangle_is_not_valid() {
        let rect = Rectangle::new(10.0, 10.0, 5.0, 20.0);
        assert!(!rect.is_valid());
    }

    #[test]
    fn test_ground_truth_starts_unused() {
        let gt = GroundTruthBox::from(ParsedBox::new(Rectangle::new(0.0, 0.0, 1.0, 1.0), "cat"));
        assert!(!gt.used);
        assert_eq!(gt.label, "cat");
    }
}
