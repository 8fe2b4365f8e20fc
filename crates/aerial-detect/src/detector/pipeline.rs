//! Orchestration of the tile, detect, remap, suppress, render sequence.

use image::RgbImage;
use log::{debug, info, warn};

use aerial_detect_core::{suppress, Detection, TileGrid};

use super::adapter::detect_tile;
use super::error::DetectError;
use super::params::{DetectParams, TileFailurePolicy};
use super::result::{TileFailure, TiledDetectionResult};
use crate::oracle::DetectionOracle;
use crate::render;
use crate::tiles::crop_tile;

/// Tiled detector over oversized rasters.
///
/// Splits the raster into overlapping tiles, runs the oracle tile by tile,
/// remaps candidates into the raster frame, and suppresses cross-tile
/// duplicates once, globally. The input raster is never modified; the
/// annotated image in the result is a copy.
#[derive(Debug, Clone)]
pub struct TiledDetector {
    params: DetectParams,
}

impl TiledDetector {
    pub fn new(params: DetectParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &DetectParams {
        &self.params
    }

    /// Runs detection over `raster` with the supplied oracle.
    pub fn detect<O: DetectionOracle + ?Sized>(
        &self,
        raster: &RgbImage,
        oracle: &mut O,
    ) -> Result<TiledDetectionResult, DetectError> {
        let (width, height) = raster.dimensions();
        let grid = TileGrid::build(width, height, &self.params.tiling)?;
        info!(
            "tiling {}x{} raster into {} tiles of {} px ({} px overlap)",
            width,
            height,
            grid.len(),
            self.params.tiling.tile_size,
            self.params.tiling.overlap
        );

        let mut raw: Vec<Detection> = Vec::new();
        let mut skipped: Vec<TileFailure> = Vec::new();
        for (tile_index, origin) in grid.origins().enumerate() {
            let tile = crop_tile(raster, origin, grid.tile_size());
            match detect_tile(oracle, &tile, self.params.confidence_threshold) {
                Ok(candidates) => {
                    debug!(
                        "tile {} at ({}, {}): {} candidates above threshold",
                        tile_index,
                        origin.x,
                        origin.y,
                        candidates.len()
                    );
                    raw.extend(candidates.into_iter().map(|c| c.into_global(origin)));
                }
                Err(error) => match self.params.tile_failure {
                    TileFailurePolicy::Skip => {
                        warn!(
                            "skipping tile {} at ({}, {}): {}",
                            tile_index, origin.x, origin.y, error
                        );
                        skipped.push(TileFailure {
                            tile_index,
                            origin,
                            error,
                        });
                    }
                    TileFailurePolicy::Abort => {
                        return Err(DetectError::DetectionFailure {
                            tile_index,
                            origin,
                            source: error,
                        });
                    }
                },
            }
        }

        // One global pass; suppressing per tile would miss duplicates that
        // straddle tile boundaries.
        let detections = suppress(&raw, &self.params.nms);
        info!(
            "{} detections kept out of {} raw candidates",
            detections.len(),
            raw.len()
        );

        let annotated = render::annotate(raster, &detections);
        Ok(TiledDetectionResult {
            detections,
            annotated,
            grid,
            skipped,
        })
    }
}
