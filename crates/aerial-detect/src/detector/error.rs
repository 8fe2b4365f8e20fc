//! Detection pipeline failures.

use thiserror::Error;

use aerial_detect_core::{TileOrigin, TilingError};

use crate::oracle::OracleError;

/// Failure of one raster's detection run.
#[derive(Debug, Error)]
pub enum DetectError {
    /// Bad tiling configuration or a raster smaller than one tile.
    #[error(transparent)]
    Tiling(#[from] TilingError),

    /// Oracle failure surfaced under [`TileFailurePolicy::Abort`].
    ///
    /// [`TileFailurePolicy::Abort`]: super::TileFailurePolicy::Abort
    #[error("detection failed on tile {tile_index} at ({x}, {y})", x = .origin.x, y = .origin.y)]
    DetectionFailure {
        tile_index: usize,
        origin: TileOrigin,
        source: OracleError,
    },
}
