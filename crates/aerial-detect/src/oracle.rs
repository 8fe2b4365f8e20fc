//! Boundary to the external detection model.

use image::RgbImage;
use thiserror::Error;

use aerial_detect_core::TileDetection;

/// Per-tile inference backend.
///
/// Implementations receive one fixed-size RGB tile and return raw candidates
/// in that tile's frame with confidences in `[0, 1]`. Filtering and
/// deduplication belong to the pipeline, so implementations should report
/// everything the model emits above its own noise floor. `&mut self` lets
/// backends reuse internal inference buffers between tiles.
pub trait DetectionOracle {
    fn detect(&mut self, tile: &RgbImage) -> Result<Vec<TileDetection>, OracleError>;
}

/// Opaque failure raised by an oracle backend.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct OracleError {
    message: String,
}

impl OracleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
