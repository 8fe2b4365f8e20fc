use std::fs;
use std::path::Path;

use aerial_detect::{
    load_json, process_directory, BatchError, BatchItemReport, BatchParams, BatchReport,
    BoundingBox, DetectParams, DetectionOracle, OracleError, TileDetection, TilingParams,
    AFTER_DIR, BEFORE_DIR, SUMMARY_FILE,
};
use image::{Rgb, RgbImage};

/// Finds the same box in every tile it is shown.
struct ConstantOracle;

impl DetectionOracle for ConstantOracle {
    fn detect(&mut self, _tile: &RgbImage) -> Result<Vec<TileDetection>, OracleError> {
        Ok(vec![TileDetection {
            bbox: BoundingBox {
                x1: 2.0,
                y1: 2.0,
                x2: 10.0,
                y2: 10.0,
            },
            confidence: 0.9,
        }])
    }
}

fn write_raster(path: &Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([40, 40, 40]))
        .save(path)
        .expect("save test raster");
}

fn small_tile_params() -> BatchParams {
    BatchParams {
        detect: DetectParams {
            tiling: TilingParams {
                tile_size: 32,
                overlap: 8,
            },
            ..DetectParams::default()
        },
        ..BatchParams::default()
    }
}

#[test]
fn batch_processes_rasters_and_records_skips() {
    let input = tempfile::tempdir().expect("input dir");
    let output = tempfile::tempdir().expect("output dir");

    write_raster(&input.path().join("a.png"), 64, 64);
    write_raster(&input.path().join("b.png"), 16, 16);
    write_raster(&input.path().join("d.jpg"), 64, 64);
    fs::write(input.path().join("c.txt"), "not a raster").expect("write c.txt");
    // Raster by extension only; decoding it fails.
    fs::write(input.path().join("corrupt.png"), "not a png").expect("write corrupt.png");

    let report = process_directory(
        input.path(),
        output.path(),
        &small_tile_params(),
        &mut ConstantOracle,
    )
    .expect("batch run");

    assert_eq!(report.processed, 2);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.items.len(), 4, "c.txt must not appear at all");
    assert_eq!(report.processed + report.skipped, report.items.len());

    // The 32/8 grid on 64x64 yields nine tiles; the scripted box maps to a
    // distinct global position in each, so nothing gets suppressed.
    match &report.items[0] {
        BatchItemReport::Processed {
            name,
            detection_count,
            ..
        } => {
            assert_eq!(name, "a.png");
            assert_eq!(*detection_count, 9);
        }
        other => panic!("expected a.png processed, got {other:?}"),
    }
    match &report.items[1] {
        BatchItemReport::Skipped { name, reason, .. } => {
            assert_eq!(name, "b.png");
            assert!(reason.contains("cannot fit"), "reason: {reason}");
        }
        other => panic!("expected b.png skipped, got {other:?}"),
    }
    match &report.items[2] {
        BatchItemReport::Skipped { name, reason, .. } => {
            assert_eq!(name, "corrupt.png");
            assert!(reason.contains("failed to load raster"), "reason: {reason}");
        }
        other => panic!("expected corrupt.png skipped, got {other:?}"),
    }
    match &report.items[3] {
        BatchItemReport::Processed { name, .. } => assert_eq!(name, "d.jpg"),
        other => panic!("expected d.jpg processed, got {other:?}"),
    }
    assert_eq!(report.total_detections, 18);

    let before = output.path().join(BEFORE_DIR);
    let after = output.path().join(AFTER_DIR);
    assert!(before.join("a.png").is_file());
    assert!(before.join("d.jpg").is_file());
    assert!(after.join("a_detections.png").is_file());
    assert!(after.join("d_detections.jpg").is_file());

    let summary: BatchReport =
        load_json(&output.path().join(SUMMARY_FILE)).expect("summary reads back");
    assert_eq!(summary.processed, report.processed);
    assert_eq!(summary.skipped, report.skipped);
    assert_eq!(summary.total_detections, report.total_detections);
    assert_eq!(summary.items.len(), report.items.len());
}

#[test]
fn batch_refuses_directory_without_rasters() {
    let input = tempfile::tempdir().expect("input dir");
    let output = tempfile::tempdir().expect("output dir");
    fs::write(input.path().join("notes.txt"), "nothing to see").expect("write notes");

    match process_directory(
        input.path(),
        output.path(),
        &BatchParams::default(),
        &mut ConstantOracle,
    ) {
        Err(BatchError::NoRasters { path }) => assert_eq!(path, input.path()),
        other => panic!("expected NoRasters, got {other:?}"),
    }
}
