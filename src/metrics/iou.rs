//! Intersection over Union (IoU) calculation.

use crate::types::Rectangle;

/// Returned by [`calculate_iou`] when two rectangles do not overlap.
///
/// Lies outside `[0.0, 1.0]`, so it never collides with a real IoU value.
pub const NO_OVERLAP: f64 = -1.0;

/// Calculate the Intersection over Union (IoU) between two rectangles.
///
/// Widths and heights count both edge pixels (`xmax - xmin + 1`), both for
/// the intersection and for each rectangle's own area.
///
/// # Arguments
///
/// * `a` - First rectangle
/// * `b` - Second rectangle
///
/// # Returns
///
/// Returns a value in `(0.0, 1.0]` when the rectangles overlap, and
/// [`NO_OVERLAP`] otherwise (including inverted or degenerate inputs).
///
/// # Example
///
/// ```
/// use recall_eval::metrics::iou::{calculate_iou, NO_OVERLAP};
/// use recall_eval::types::Rectangle;
///
/// let a = Rectangle::new(0.0, 0.0, 9.0, 9.0);
/// let b = Rectangle::new(5.0, 5.0, 14.0, 14.0);
/// let iou = calculate_iou(&a, &b);
/// assert!(iou > 0.0 && iou < 1.0);
///
/// let far = Rectangle::new(50.0, 50.0, 60.0, 60.0);
/// assert_eq!(calculate_iou(&a, &far), NO_OVERLAP);
/// ```
pub fn calculate_iou(a: &Rectangle, b: &Rectangle) -> f64 {
    let intersection = Rectangle::new(
        a.xmin.max(b.xmin),
        a.ymin.max(b.ymin),
        a.xmax.min(b.xmax),
        a.ymax.min(b.ymax),
    );

    let iw = intersection.width();
    let ih = intersection.height();
    if iw > 0.0 && ih > 0.0 {
        let intersection_area = iw * ih;
        let union_area = a.area() + b.area() - intersection_area;
        return intersection_area / union_area;
    }

    NO_OVERLAP
}
