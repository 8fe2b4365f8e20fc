//! Geometry and suppression primitives for tiled aerial object detection.
//!
//! Current focus:
//! - overlapping tile grids with guaranteed edge coverage,
//! - tile-local to full-raster coordinate mapping,
//! - greedy non-maximum suppression of cross-tile duplicates,
//! - pixel to geographic coordinate interpolation.
//!
//! This crate is intentionally small and purely numeric: no pixel buffers,
//! no file formats. Image handling lives in `aerial-detect`.

mod bbox;
mod detection;
mod geo;
mod grid;
mod nms;

pub use bbox::BoundingBox;
pub use detection::{Detection, TileDetection};
pub use geo::{dms_to_decimal, GeoBounds, GeoError, GeoReference, Hemisphere, LatLon};
pub use grid::{TileGrid, TileOrigin, TilingError, TilingParams};
pub use nms::{suppress, NmsParams};
