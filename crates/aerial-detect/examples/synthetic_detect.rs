//! End-to-end run on a synthetic raster, no model file required.
//!
//! Paints bright blobs on a dark 1280x1280 canvas, detects them with a
//! brightness-threshold oracle, and saves the annotated result to the
//! system temp directory.

use std::error::Error;

use aerial_detect::{
    save_raster, BoundingBox, DetectParams, DetectionOracle, OracleError, TileDetection,
    TiledDetector,
};
use image::{Rgb, RgbImage};

/// Boxes the bright region of a tile, if any.
struct BrightBlobOracle {
    min_luma: u8,
}

impl DetectionOracle for BrightBlobOracle {
    fn detect(&mut self, tile: &RgbImage) -> Result<Vec<TileDetection>, OracleError> {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        let mut seen = false;
        for (x, y, pixel) in tile.enumerate_pixels() {
            if pixel[0] >= self.min_luma {
                seen = true;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
        if !seen {
            return Ok(Vec::new());
        }

        // A blob cut by the tile edge shows up as a box touching the
        // border; skip it, an overlapping neighbor sees it whole.
        let (width, height) = tile.dimensions();
        if min_x == 0 || min_y == 0 || max_x == width - 1 || max_y == height - 1 {
            return Ok(Vec::new());
        }

        Ok(vec![TileDetection {
            bbox: BoundingBox {
                x1: min_x as f32,
                y1: min_y as f32,
                x2: (max_x + 1) as f32,
                y2: (max_y + 1) as f32,
            },
            confidence: 0.99,
        }])
    }
}

fn paint_blob(raster: &mut RgbImage, x0: u32, y0: u32, side: u32) {
    for y in y0..y0 + side {
        for x in x0..x0 + side {
            raster.put_pixel(x, y, Rgb([235, 235, 235]));
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut raster = RgbImage::from_pixel(1280, 1280, Rgb([18, 18, 18]));
    paint_blob(&mut raster, 100, 100, 40);
    paint_blob(&mut raster, 700, 200, 40);
    paint_blob(&mut raster, 300, 900, 40);

    let detector = TiledDetector::new(DetectParams::default());
    let mut oracle = BrightBlobOracle { min_luma: 128 };
    let result = detector.detect(&raster, &mut oracle)?;

    println!("{} blobs found:", result.detections.len());
    for d in &result.detections {
        println!(
            "  center ({:.1}, {:.1})  confidence {:.2}",
            d.center[0], d.center[1], d.confidence
        );
    }

    let out = std::env::temp_dir().join("synthetic_detections.png");
    save_raster(&out, &result.annotated)?;
    println!("annotated raster: {}", out.display());
    Ok(())
}
