//! Neural detection backend on top of [rten].
//!
//! Loads an exported `.rten` model and decodes its output into
//! [`TileDetection`]s. The model is expected to produce a `[1, 4 + C, A]`
//! tensor: center-format box rows first, then one score row per class.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbImage;
use rten::Model;
use rten_tensor::prelude::*;
use rten_tensor::NdTensor;

use aerial_detect_core::{BoundingBox, TileDetection};

use crate::oracle::{DetectionOracle, OracleError};

/// Candidates below this are empty anchor cells, not detections.
const NOISE_FLOOR: f32 = 0.01;

/// Detection oracle backed by an rten model.
pub struct RtenOracle {
    model: Model,
    input_size: u32,
}

impl RtenOracle {
    /// Loads a model from disk. `input_size` is the square side length the
    /// model was exported for; tiles of other sizes are resized to it.
    pub fn load(path: &Path, input_size: u32) -> Result<Self, OracleError> {
        if input_size == 0 {
            return Err(OracleError::new("model input size must be positive"));
        }
        let model = Model::load_file(path)
            .map_err(|e| OracleError::new(format!("cannot load model {}: {}", path.display(), e)))?;
        Ok(Self { model, input_size })
    }

    /// NCHW float tensor in [0, 1], plus the factors that map model
    /// coordinates back onto the tile.
    fn preprocess(&self, tile: &RgbImage) -> (NdTensor<f32, 4>, f32, f32) {
        let (tile_w, tile_h) = tile.dimensions();
        let size = self.input_size;

        let resized;
        let input = if (tile_w, tile_h) == (size, size) {
            tile
        } else {
            resized = imageops::resize(tile, size, size, FilterType::Triangle);
            &resized
        };

        let mut tensor = NdTensor::zeros([1, 3, size as usize, size as usize]);
        for (x, y, pixel) in input.enumerate_pixels() {
            for channel in 0..3 {
                tensor[[0, channel, y as usize, x as usize]] = f32::from(pixel[channel]) / 255.0;
            }
        }
        (tensor, tile_w as f32 / size as f32, tile_h as f32 / size as f32)
    }
}

impl DetectionOracle for RtenOracle {
    fn detect(&mut self, tile: &RgbImage) -> Result<Vec<TileDetection>, OracleError> {
        let (input, scale_x, scale_y) = self.preprocess(tile);
        let output = self
            .model
            .run_one(input.view().into(), None)
            .map_err(|e| OracleError::new(format!("inference failed: {e}")))?;
        let preds: NdTensor<f32, 3> = output
            .try_into()
            .map_err(|_| OracleError::new("unexpected model output shape"))?;
        decode(&preds, scale_x, scale_y)
    }
}

fn decode(
    preds: &NdTensor<f32, 3>,
    scale_x: f32,
    scale_y: f32,
) -> Result<Vec<TileDetection>, OracleError> {
    let rows = preds.size(1);
    let anchors = preds.size(2);
    if rows < 5 {
        return Err(OracleError::new(
            "model output must carry four box rows and at least one class row",
        ));
    }

    let mut detections = Vec::new();
    for anchor in 0..anchors {
        let mut confidence = 0.0f32;
        for row in 4..rows {
            confidence = confidence.max(preds[[0, row, anchor]]);
        }
        if confidence < NOISE_FLOOR {
            continue;
        }

        let cx = preds[[0, 0, anchor]] * scale_x;
        let cy = preds[[0, 1, anchor]] * scale_y;
        let half_w = preds[[0, 2, anchor]] * scale_x / 2.0;
        let half_h = preds[[0, 3, anchor]] * scale_y / 2.0;
        detections.push(TileDetection {
            bbox: BoundingBox {
                x1: cx - half_w,
                y1: cy - half_h,
                x2: cx + half_w,
                y2: cy + half_h,
            },
            confidence,
        });
    }
    Ok(detections)
}
