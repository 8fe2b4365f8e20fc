//! Greedy non-maximum suppression of duplicate detections.

use serde::{Deserialize, Serialize};

use crate::detection::Detection;

/// Two-stage suppression settings: a raw score gate, then greedy IoU
/// suppression among the survivors. Both stages use strict comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NmsParams {
    /// Detections must score strictly above this to enter suppression.
    pub score_threshold: f32,
    /// A remaining detection is dropped when its IoU with an already kept
    /// one strictly exceeds this.
    pub iou_threshold: f32,
}

impl Default for NmsParams {
    fn default() -> Self {
        Self {
            score_threshold: 0.3,
            iou_threshold: 0.3,
        }
    }
}

/// Collapses duplicate detections of one object seen from several
/// overlapping tiles.
///
/// Survivors of the score gate are visited in descending-confidence order
/// (stable: equal confidences keep their input order). Each visited
/// detection is kept unless it overlaps an already kept one beyond
/// `iou_threshold`. Kept detections are returned in descending-confidence
/// order. Empty input returns empty.
pub fn suppress(detections: &[Detection], params: &NmsParams) -> Vec<Detection> {
    let mut order: Vec<usize> = (0..detections.len())
        .filter(|&i| detections[i].confidence > params.score_threshold)
        .collect();
    order.sort_by(|&a, &b| {
        detections[b]
            .confidence
            .partial_cmp(&detections[a].confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept: Vec<Detection> = Vec::new();
    for i in order {
        let candidate = detections[i];
        if kept
            .iter()
            .all(|k| k.bbox.iou(&candidate.bbox) <= params.iou_threshold)
        {
            kept.push(candidate);
        }
    }
    kept
}
