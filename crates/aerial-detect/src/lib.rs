//! Tiled object detection over oversized aerial and satellite rasters.
//!
//! The pipeline splits a raster into overlapping fixed-size tiles, runs an
//! injected detection oracle per tile, remaps every candidate into the
//! full-raster frame, and collapses cross-tile duplicates in one global
//! suppression pass. Rendering, raster/report I/O, and a directory batch
//! driver sit on top; the numeric core lives in `aerial-detect-core`.
//!
//! ```
//! use aerial_detect::{
//!     DetectParams, DetectionOracle, OracleError, TileDetection, TiledDetector,
//! };
//! use image::RgbImage;
//!
//! struct Null;
//!
//! impl DetectionOracle for Null {
//!     fn detect(&mut self, _tile: &RgbImage) -> Result<Vec<TileDetection>, OracleError> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! # fn main() -> Result<(), aerial_detect::DetectError> {
//! let raster = RgbImage::new(1280, 1280);
//! let detector = TiledDetector::new(DetectParams::default());
//! let result = detector.detect(&raster, &mut Null)?;
//! assert!(result.detections.is_empty());
//! assert_eq!(result.grid.len(), 9);
//! # Ok(())
//! # }
//! ```

mod batch;
mod detector;
mod oracle;
mod raster;
mod render;
mod report;
#[cfg(feature = "rten")]
mod rten_backend;
mod tiles;

pub use batch::{
    process_directory, BatchError, BatchItemReport, BatchParams, BatchReport, AFTER_DIR,
    BEFORE_DIR, SUMMARY_FILE,
};
pub use detector::{
    DetectError, DetectParams, TileFailure, TileFailurePolicy, TiledDetectionResult,
    TiledDetector,
};
pub use oracle::{DetectionOracle, OracleError};
pub use raster::{annotated_file_name, load_raster, save_raster, RasterIoError};
pub use render::{annotate, draw_tile_grid};
pub use report::{
    load_json, read_centers, write_centers, write_json, CenterRecord, DetectReport, ReportError,
};
#[cfg(feature = "rten")]
pub use rten_backend::RtenOracle;
pub use tiles::crop_tile;

pub use aerial_detect_core::{
    dms_to_decimal, suppress, BoundingBox, Detection, GeoBounds, GeoError, GeoReference,
    Hemisphere, LatLon, NmsParams, TileDetection, TileGrid, TileOrigin, TilingError, TilingParams,
};
