//! Detections in the tile-local and full-raster coordinate frames.
//!
//! The two frames are separate types on purpose: a [`TileDetection`] cannot
//! reach reporting or suppression without passing through
//! [`TileDetection::into_global`], so mixed-frame geometry does not compile.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::grid::TileOrigin;

/// Raw candidate from the detection oracle, relative to one tile's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDetection {
    pub bbox: BoundingBox,
    pub confidence: f32,
}

impl TileDetection {
    pub fn new(bbox: BoundingBox, confidence: f32) -> Self {
        Self { bbox, confidence }
    }

    /// Projects the detection into the full-raster frame.
    ///
    /// Both corners shift by the tile origin; the center is recomputed from
    /// the shifted box instead of being translated separately, so it is the
    /// exact midpoint by construction.
    #[must_use]
    pub fn into_global(self, origin: TileOrigin) -> Detection {
        let bbox = self.bbox.translate(origin.x as f32, origin.y as f32);
        Detection {
            bbox,
            confidence: self.confidence,
            center: bbox.center(),
        }
    }
}

/// Detection in the full-raster frame, as persisted in reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: BoundingBox,
    /// Oracle confidence in `[0, 1]`.
    pub confidence: f32,
    /// Midpoint of `bbox`, kept explicit for flat result files.
    pub center: [f32; 2],
}

impl Detection {
    pub fn from_bbox(bbox: BoundingBox, confidence: f32) -> Self {
        Self {
            bbox,
            confidence,
            center: bbox.center(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_box_is_local_box_plus_origin() {
        let local = TileDetection::new(BoundingBox::new(10.5, 20.25, 30.5, 44.25), 0.92);
        let global = local.into_global(TileOrigin::new(540, 640));
        assert_eq!(global.bbox, BoundingBox::new(551.0, 660.25, 571.0, 684.25));
        assert_eq!(global.confidence, 0.92);
    }

    #[test]
    fn mapping_subtracts_back_exactly() {
        // Halves stay exact under translation by whole-pixel origins.
        let local = BoundingBox::new(12.5, 7.25, 99.5, 63.75);
        let origin = TileOrigin::new(640, 540);
        let global = TileDetection::new(local, 0.5).into_global(origin);
        let back = global.bbox.translate(-(origin.x as f32), -(origin.y as f32));
        assert_eq!(back, local);
    }

    #[test]
    fn center_is_midpoint_of_mapped_box() {
        let local = TileDetection::new(BoundingBox::new(0.0, 0.0, 10.0, 20.0), 0.8);
        let global = local.into_global(TileOrigin::new(100, 200));
        assert_eq!(global.center, [105.0, 210.0]);
        assert_eq!(global.center, global.bbox.center());
    }

    #[test]
    fn zero_origin_is_identity() {
        let local = TileDetection::new(BoundingBox::new(1.0, 2.0, 3.0, 4.0), 0.7);
        let global = local.into_global(TileOrigin::new(0, 0));
        assert_eq!(global.bbox, BoundingBox::new(1.0, 2.0, 3.0, 4.0));
    }
}
