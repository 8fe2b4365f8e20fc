//! Directory-level batch processing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use aerial_detect_core::Detection;

use crate::detector::{DetectError, DetectParams, TiledDetector};
use crate::oracle::DetectionOracle;
use crate::raster::{annotated_file_name, load_raster, save_raster, RasterIoError};
use crate::render;
use crate::report::{write_json, ReportError};

pub const BEFORE_DIR: &str = "before_processing";
pub const AFTER_DIR: &str = "after_processing";
pub const SUMMARY_FILE: &str = "processing_summary.json";

/// Batch settings: per-raster detection parameters plus output presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchParams {
    pub detect: DetectParams,
    /// Draw the tile grid on annotated outputs.
    pub draw_grid: bool,
}

impl Default for BatchParams {
    fn default() -> Self {
        Self {
            detect: DetectParams::default(),
            draw_grid: true,
        }
    }
}

/// Failures that prevent the batch from starting. Per-raster problems never
/// surface here; they are recorded in the summary instead.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("cannot read input directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no rasters (png/jpg/jpeg) found in {path}")]
    NoRasters { path: PathBuf },

    #[error("cannot create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write batch summary: {0}")]
    Summary(#[from] ReportError),
}

/// Outcome for one raster of the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum BatchItemReport {
    /// Raster processed end to end.
    Processed {
        name: String,
        source: PathBuf,
        before_path: PathBuf,
        after_path: PathBuf,
        detection_count: usize,
        detections: Vec<Detection>,
        skipped_tiles: usize,
    },
    /// Raster skipped; the batch carried on.
    Skipped {
        name: String,
        source: PathBuf,
        reason: String,
    },
}

/// Summary persisted as `processing_summary.json` in the output directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub params: BatchParams,
    pub processed: usize,
    pub skipped: usize,
    pub total_detections: usize,
    pub before_dir: PathBuf,
    pub after_dir: PathBuf,
    pub items: Vec<BatchItemReport>,
}

/// Per-raster failure folded into the summary as a skip reason.
#[derive(Debug, Error)]
enum ItemError {
    #[error(transparent)]
    Raster(#[from] RasterIoError),

    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error("cannot copy input to {path}: {source}")]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Runs tiled detection over every raster in `input_dir`.
///
/// Each processed input is copied into `<output_dir>/before_processing/`,
/// its annotated counterpart written to `<output_dir>/after_processing/`,
/// and the summary saved as `processing_summary.json`. Unreadable or
/// undersized rasters are recorded as skipped; once started the batch
/// always runs to completion.
pub fn process_directory<O: DetectionOracle + ?Sized>(
    input_dir: &Path,
    output_dir: &Path,
    params: &BatchParams,
    oracle: &mut O,
) -> Result<BatchReport, BatchError> {
    let inputs = collect_rasters(input_dir)?;
    if inputs.is_empty() {
        return Err(BatchError::NoRasters {
            path: input_dir.to_path_buf(),
        });
    }

    let before_dir = output_dir.join(BEFORE_DIR);
    let after_dir = output_dir.join(AFTER_DIR);
    for dir in [&before_dir, &after_dir] {
        fs::create_dir_all(dir).map_err(|source| BatchError::CreateDir {
            path: dir.clone(),
            source,
        })?;
    }

    let detector = TiledDetector::new(params.detect);
    let mut items = Vec::with_capacity(inputs.len());
    let mut total_detections = 0;

    info!(
        "batch over {} rasters from {}",
        inputs.len(),
        input_dir.display()
    );
    for source in inputs {
        let name = file_name(&source);
        match process_one(&detector, params, oracle, &source, &before_dir, &after_dir) {
            Ok(item) => {
                if let BatchItemReport::Processed {
                    detection_count, ..
                } = &item
                {
                    total_detections += detection_count;
                }
                items.push(item);
            }
            Err(error) => {
                warn!("skipping {}: {}", name, error);
                items.push(BatchItemReport::Skipped {
                    name,
                    source,
                    reason: error.to_string(),
                });
            }
        }
    }

    let processed = items
        .iter()
        .filter(|item| matches!(item, BatchItemReport::Processed { .. }))
        .count();
    let report = BatchReport {
        params: *params,
        processed,
        skipped: items.len() - processed,
        total_detections,
        before_dir,
        after_dir,
        items,
    };
    write_json(&output_dir.join(SUMMARY_FILE), &report)?;
    info!(
        "batch done: {} processed, {} skipped, {} detections",
        report.processed, report.skipped, report.total_detections
    );
    Ok(report)
}

fn process_one<O: DetectionOracle + ?Sized>(
    detector: &TiledDetector,
    params: &BatchParams,
    oracle: &mut O,
    source: &Path,
    before_dir: &Path,
    after_dir: &Path,
) -> Result<BatchItemReport, ItemError> {
    let name = file_name(source);

    // The pristine copy is written first: if detection then fails, the
    // before image still documents the input.
    let before_path = before_dir.join(&name);
    fs::copy(source, &before_path).map_err(|e| ItemError::Copy {
        path: before_path.clone(),
        source: e,
    })?;

    let raster = load_raster(source)?;
    let result = detector.detect(&raster, oracle)?;

    let mut annotated = result.annotated;
    if params.draw_grid {
        render::draw_tile_grid(&mut annotated, &result.grid);
    }
    let after_path = after_dir.join(annotated_file_name(source));
    save_raster(&after_path, &annotated)?;

    Ok(BatchItemReport::Processed {
        name,
        source: source.to_path_buf(),
        before_path,
        after_path,
        detection_count: result.detections.len(),
        detections: result.detections,
        skipped_tiles: result.skipped.len(),
    })
}

fn collect_rasters(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let read_dir_err = |source: io::Error| BatchError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut rasters = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();
        if !path.is_file() {
            continue;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        if matches!(ext.as_deref(), Some("png" | "jpg" | "jpeg")) {
            rasters.push(path);
        }
    }
    // Directory iteration order is platform-dependent; keep runs stable.
    rasters.sort();
    Ok(rasters)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
