//! Outcome of one raster's detection run.

use image::RgbImage;

use aerial_detect_core::{Detection, TileGrid, TileOrigin};

use crate::oracle::OracleError;

/// Tile whose oracle call failed under [`TileFailurePolicy::Skip`].
///
/// [`TileFailurePolicy::Skip`]: super::TileFailurePolicy::Skip
#[derive(Debug, Clone)]
pub struct TileFailure {
    pub tile_index: usize,
    pub origin: TileOrigin,
    pub error: OracleError,
}

/// Kept detections plus the annotated copy of the input raster.
#[derive(Debug)]
pub struct TiledDetectionResult {
    /// Final detections, descending confidence, full-raster frame.
    pub detections: Vec<Detection>,
    /// Copy of the input with boxes and confidence captions drawn in.
    pub annotated: RgbImage,
    /// The grid the raster was processed with; reuse it for overlay
    /// drawing so visuals cannot drift from the actual tiling.
    pub grid: TileGrid,
    /// Tiles skipped because the oracle failed on them.
    pub skipped: Vec<TileFailure>,
}

impl TiledDetectionResult {
    /// True when every tile contributed.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
