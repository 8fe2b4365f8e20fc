//! Detection reports and flat result files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use aerial_detect_core::Detection;

use crate::detector::{DetectParams, TiledDetectionResult};
use crate::raster::parent_dir;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed centers record at {path}:{line}")]
    MalformedCenters { path: PathBuf, line: usize },
}

/// Report written alongside a single annotated raster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectReport {
    pub image: PathBuf,
    pub params: DetectParams,
    pub detection_count: usize,
    pub detections: Vec<Detection>,
    pub skipped_tiles: usize,
}

impl DetectReport {
    pub fn new(image: &Path, params: &DetectParams, result: &TiledDetectionResult) -> Self {
        Self {
            image: image.to_path_buf(),
            params: *params,
            detection_count: result.detections.len(),
            detections: result.detections.clone(),
            skipped_tiles: result.skipped.len(),
        }
    }
}

/// Pretty-printed JSON, parent directories created as needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ReportError> {
    if let Some(parent) = parent_dir(path) {
        fs::create_dir_all(parent)?;
    }
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text)?;
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ReportError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// One `cx,cy,confidence` record of a centers file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterRecord {
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
}

/// Writes one `cx,cy,confidence` line per detection.
pub fn write_centers(path: &Path, detections: &[Detection]) -> Result<(), ReportError> {
    if let Some(parent) = parent_dir(path) {
        fs::create_dir_all(parent)?;
    }
    let mut text = String::new();
    for det in detections {
        text.push_str(&format!(
            "{},{},{}\n",
            det.center[0], det.center[1], det.confidence
        ));
    }
    fs::write(path, text)?;
    Ok(())
}

/// Reads a centers file back; blank lines are skipped.
pub fn read_centers(path: &Path) -> Result<Vec<CenterRecord>, ReportError> {
    let text = fs::read_to_string(path)?;
    let mut records = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.splitn(3, ',');
        let field = |part: Option<&str>| part.and_then(|s| s.trim().parse::<f32>().ok());
        match (
            field(parts.next()),
            field(parts.next()),
            field(parts.next()),
        ) {
            (Some(x), Some(y), Some(confidence)) => records.push(CenterRecord { x, y, confidence }),
            _ => {
                return Err(ReportError::MalformedCenters {
                    path: path.to_path_buf(),
                    line: idx + 1,
                })
            }
        }
    }
    Ok(records)
}
