//! Tiled detection pipeline: tile, detect, remap, suppress, render.

mod adapter;
mod error;
mod params;
mod pipeline;
mod result;

pub use error::DetectError;
pub use params::{DetectParams, TileFailurePolicy};
pub use pipeline::TiledDetector;
pub use result::{TileFailure, TiledDetectionResult};
