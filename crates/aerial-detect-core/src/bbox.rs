//! Axis-aligned bounding boxes in pixel space.

use serde::{Deserialize, Serialize};

/// Axis-aligned box with `(x1, y1)` top-left and `(x2, y2)` bottom-right
/// corners, in pixels.
///
/// Coordinates stay `f32` end to end (detection backends emit fractional
/// pixels); rounding happens only at the rendering boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).max(0.0)
    }

    #[inline]
    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).max(0.0)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Midpoint of the box.
    #[inline]
    pub fn center(&self) -> [f32; 2] {
        [(self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0]
    }

    /// Box shifted by `(dx, dy)`, corners moved together.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
        }
    }

    /// Area shared with `other`; zero when the boxes do not overlap.
    pub fn intersection_area(&self, other: &Self) -> f32 {
        let w = self.x2.min(other.x2) - self.x1.max(other.x1);
        let h = self.y2.min(other.y2) - self.y1.max(other.y1);
        if w <= 0.0 || h <= 0.0 {
            return 0.0;
        }
        w * h
    }

    /// Intersection over union with `other`.
    ///
    /// Zero for disjoint boxes; a zero-area box has zero IoU with anything.
    pub fn iou(&self, other: &Self) -> f32 {
        let inter = self.intersection_area(other);
        if inter <= 0.0 {
            return 0.0;
        }
        let union = self.area() + other.area() - inter;
        if union <= 0.0 {
            return 0.0;
        }
        inter / union
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn iou_of_identical_boxes_is_one() {
        let b = BoundingBox::new(2.0, 3.0, 12.0, 9.0);
        assert_relative_eq!(b.iou(&b), 1.0);
    }

    #[test]
    fn iou_of_disjoint_boxes_is_zero() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(20.0, 20.0, 30.0, 30.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn iou_of_touching_boxes_is_zero() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(10.0, 0.0, 20.0, 10.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn zero_area_box_has_zero_iou() {
        let line = BoundingBox::new(5.0, 0.0, 5.0, 10.0);
        let solid = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(line.iou(&solid), 0.0);
        assert_eq!(solid.iou(&line), 0.0);
    }

    #[test]
    fn iou_of_offset_boxes() {
        // 9x9 shared region, areas 100 and 81.
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(1.0, 1.0, 10.0, 10.0);
        assert_relative_eq!(a.intersection_area(&b), 81.0);
        assert_relative_eq!(a.iou(&b), 0.81);
    }

    #[test]
    fn translate_moves_both_corners() {
        let b = BoundingBox::new(1.0, 2.0, 3.0, 4.0).translate(10.0, 20.0);
        assert_eq!(b, BoundingBox::new(11.0, 22.0, 13.0, 24.0));
    }

    #[test]
    fn center_is_midpoint() {
        let b = BoundingBox::new(0.0, 0.0, 10.0, 4.0);
        assert_eq!(b.center(), [5.0, 2.0]);
    }

    #[test]
    fn negative_extent_clamps_to_zero() {
        let b = BoundingBox::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.area(), 0.0);
    }
}
