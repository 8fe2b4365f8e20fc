//! Confidence-gating wrapper around the detection oracle.

use image::RgbImage;

use aerial_detect_core::TileDetection;

use crate::oracle::{DetectionOracle, OracleError};

/// Runs the oracle on one tile and keeps candidates strictly above
/// `confidence_threshold`.
///
/// Geometry and confidence pass through untouched; a candidate at exactly
/// the threshold is dropped. Oracle failures propagate to the caller, which
/// owns the skip-or-abort decision.
pub fn detect_tile<O: DetectionOracle + ?Sized>(
    oracle: &mut O,
    tile: &RgbImage,
    confidence_threshold: f32,
) -> Result<Vec<TileDetection>, OracleError> {
    let candidates = oracle.detect(tile)?;
    Ok(candidates
        .into_iter()
        .filter(|c| c.confidence > confidence_threshold)
        .collect())
}
