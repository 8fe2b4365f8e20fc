//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use aerial_detect_core::{NmsParams, TilingError, TilingParams};

/// What the orchestrator does when the oracle fails on a single tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileFailurePolicy {
    /// Log, record the tile in the result, keep processing the raster.
    #[default]
    Skip,
    /// Fail the whole raster on the first tile error.
    Abort,
}

/// Tiled detection settings.
///
/// Defaults: 640 px tiles with 100 px overlap, candidates kept strictly
/// above 0.85 confidence, then a 0.3 score gate and 0.3 IoU suppression.
/// The score gate and the confidence threshold are deliberately
/// independent knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectParams {
    pub tiling: TilingParams,
    /// Tile-level gate: candidates at or below this never leave the
    /// adapter.
    pub confidence_threshold: f32,
    pub nms: NmsParams,
    pub tile_failure: TileFailurePolicy,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            tiling: TilingParams::default(),
            confidence_threshold: 0.85,
            nms: NmsParams::default(),
            tile_failure: TileFailurePolicy::default(),
        }
    }
}

impl DetectParams {
    pub fn validate(&self) -> Result<(), TilingError> {
        self.tiling.validate()
    }
}
