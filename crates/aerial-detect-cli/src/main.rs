//! aerial-detect CLI — tiled object detection over aerial rasters.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use aerial_detect::{
    annotate, annotated_file_name, draw_tile_grid, load_json, load_raster, read_centers,
    save_raster, DetectReport, GeoBounds, GeoReference, TileGrid, TilingParams,
};
#[cfg(feature = "rten")]
use aerial_detect::{
    process_directory, write_centers, write_json, BatchParams, DetectParams, NmsParams,
    RtenOracle, TileFailurePolicy, TiledDetector, SUMMARY_FILE,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "aerial-detect")]
#[command(about = "Detect objects in oversized aerial rasters via overlapping tiles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect objects in one raster using an exported .rten model.
    #[cfg(feature = "rten")]
    Detect(DetectArgs),

    /// Run detection over every raster in a directory.
    #[cfg(feature = "rten")]
    Batch(BatchArgs),

    /// Plan the tile grid for given raster dimensions.
    Grid(GridArgs),

    /// Redraw detections from a saved report onto a raster.
    Annotate(AnnotateArgs),

    /// Convert detection centers to geographic coordinates.
    Geolocate(GeolocateArgs),
}

#[cfg(feature = "rten")]
#[derive(Debug, Clone, Args)]
struct PipelineArgs {
    /// Tile edge length in pixels.
    #[arg(long, default_value_t = TilingParams::default().tile_size)]
    tile_size: u32,

    /// Overlap between neighboring tiles in pixels.
    #[arg(long, default_value_t = TilingParams::default().overlap)]
    overlap: u32,

    /// Keep tile candidates only strictly above this confidence.
    #[arg(long, default_value_t = DetectParams::default().confidence_threshold)]
    confidence: f32,

    /// Suppression score floor.
    #[arg(long, default_value_t = NmsParams::default().score_threshold)]
    score_threshold: f32,

    /// Suppression overlap limit.
    #[arg(long, default_value_t = NmsParams::default().iou_threshold)]
    iou_threshold: f32,

    /// Fail the raster instead of skipping a tile whose model call fails.
    #[arg(long)]
    abort_on_failed_tile: bool,
}

#[cfg(feature = "rten")]
impl PipelineArgs {
    fn to_params(&self) -> DetectParams {
        DetectParams {
            tiling: TilingParams {
                tile_size: self.tile_size,
                overlap: self.overlap,
            },
            confidence_threshold: self.confidence,
            nms: NmsParams {
                score_threshold: self.score_threshold,
                iou_threshold: self.iou_threshold,
            },
            tile_failure: if self.abort_on_failed_tile {
                TileFailurePolicy::Abort
            } else {
                TileFailurePolicy::Skip
            },
        }
    }
}

#[cfg(feature = "rten")]
#[derive(Debug, Clone, Args)]
struct DetectArgs {
    /// Path to the input raster.
    #[arg(long)]
    image: PathBuf,

    /// Path to the exported .rten detection model.
    #[arg(long)]
    model: PathBuf,

    /// Path for the annotated raster. Defaults to `<stem>_detections.<ext>`
    /// next to the input.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write detection centers as `x,y,confidence` lines.
    #[arg(long)]
    centers: Option<PathBuf>,

    /// Write the full detection report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Draw the tile grid on the annotated raster.
    #[arg(long)]
    draw_grid: bool,

    #[command(flatten)]
    pipeline: PipelineArgs,
}

#[cfg(feature = "rten")]
#[derive(Debug, Clone, Args)]
struct BatchArgs {
    /// Directory holding the input rasters.
    #[arg(long)]
    input: PathBuf,

    /// Directory for before/after copies and the summary.
    #[arg(long)]
    output: PathBuf,

    /// Path to the exported .rten detection model.
    #[arg(long)]
    model: PathBuf,

    /// Skip the tile grid overlay on annotated outputs.
    #[arg(long)]
    no_grid: bool,

    #[command(flatten)]
    pipeline: PipelineArgs,
}

#[derive(Debug, Clone, Args)]
struct GridArgs {
    /// Raster width in pixels.
    #[arg(long, required_unless_present = "image", conflicts_with = "image")]
    width: Option<u32>,

    /// Raster height in pixels.
    #[arg(long, required_unless_present = "image", conflicts_with = "image")]
    height: Option<u32>,

    /// Read dimensions from this raster instead of --width/--height.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Write a copy of --image with the grid drawn in.
    #[arg(long, requires = "image")]
    overlay: Option<PathBuf>,

    /// Tile edge length in pixels.
    #[arg(long, default_value_t = TilingParams::default().tile_size)]
    tile_size: u32,

    /// Overlap between neighboring tiles in pixels.
    #[arg(long, default_value_t = TilingParams::default().overlap)]
    overlap: u32,
}

#[derive(Debug, Clone, Args)]
struct AnnotateArgs {
    /// Path to the raster the report was produced from.
    #[arg(long)]
    image: PathBuf,

    /// Detection report JSON written by `detect --report`.
    #[arg(long)]
    report: PathBuf,

    /// Path for the annotated raster. Defaults to `<stem>_detections.<ext>`
    /// next to the input.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Draw the tile grid recorded in the report.
    #[arg(long)]
    draw_grid: bool,
}

#[derive(Debug, Clone, Args)]
struct GeolocateArgs {
    /// Centers file with `x,y,confidence` lines.
    #[arg(long)]
    centers: PathBuf,

    /// Width in pixels of the raster the centers refer to.
    #[arg(long)]
    width: u32,

    /// Height in pixels of the raster the centers refer to.
    #[arg(long)]
    height: u32,

    /// Southern raster edge, decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    south: f64,

    /// Western raster edge, decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    west: f64,

    /// Northern raster edge, decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    north: f64,

    /// Eastern raster edge, decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    east: f64,
}

fn main() -> CliResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        #[cfg(feature = "rten")]
        Commands::Detect(args) => run_detect(&args),
        #[cfg(feature = "rten")]
        Commands::Batch(args) => run_batch(&args),
        Commands::Grid(args) => run_grid(&args),
        Commands::Annotate(args) => run_annotate(&args),
        Commands::Geolocate(args) => run_geolocate(&args),
    }
}

fn output_next_to(image: &Path) -> PathBuf {
    image.with_file_name(annotated_file_name(image))
}

// ── detect ─────────────────────────────────────────────────────────────

#[cfg(feature = "rten")]
fn run_detect(args: &DetectArgs) -> CliResult<()> {
    let raster = load_raster(&args.image)?;
    log::info!(
        "loaded {} ({}x{})",
        args.image.display(),
        raster.width(),
        raster.height()
    );

    let params = args.pipeline.to_params();
    let mut oracle = RtenOracle::load(&args.model, params.tiling.tile_size)?;
    let detector = TiledDetector::new(params);
    let result = detector.detect(&raster, &mut oracle)?;
    println!(
        "{}: {} detections, {} tiles skipped",
        args.image.display(),
        result.detections.len(),
        result.skipped.len()
    );

    let mut annotated = result.annotated;
    if args.draw_grid {
        draw_tile_grid(&mut annotated, &result.grid);
    }
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| output_next_to(&args.image));
    save_raster(&output, &annotated)?;
    println!("annotated raster: {}", output.display());

    if let Some(path) = &args.centers {
        write_centers(path, &result.detections)?;
        println!("centers: {}", path.display());
    }
    if let Some(path) = &args.report {
        let report = DetectReport {
            image: args.image.clone(),
            params,
            detection_count: result.detections.len(),
            detections: result.detections,
            skipped_tiles: result.skipped.len(),
        };
        write_json(path, &report)?;
        println!("report: {}", path.display());
    }
    Ok(())
}

// ── batch ──────────────────────────────────────────────────────────────

#[cfg(feature = "rten")]
fn run_batch(args: &BatchArgs) -> CliResult<()> {
    let params = BatchParams {
        detect: args.pipeline.to_params(),
        draw_grid: !args.no_grid,
    };
    let mut oracle = RtenOracle::load(&args.model, params.detect.tiling.tile_size)?;

    let report = process_directory(&args.input, &args.output, &params, &mut oracle)?;
    println!(
        "{} processed, {} skipped, {} detections",
        report.processed, report.skipped, report.total_detections
    );
    println!("summary: {}", args.output.join(SUMMARY_FILE).display());
    Ok(())
}

// ── grid ───────────────────────────────────────────────────────────────

fn run_grid(args: &GridArgs) -> CliResult<()> {
    let params = TilingParams {
        tile_size: args.tile_size,
        overlap: args.overlap,
    };

    let (width, height, raster) = match &args.image {
        Some(path) => {
            let raster = load_raster(path)?;
            let (w, h) = raster.dimensions();
            (w, h, Some(raster))
        }
        None => {
            let width = args.width.ok_or("--width is required without --image")?;
            let height = args.height.ok_or("--height is required without --image")?;
            (width, height, None)
        }
    };

    let grid = TileGrid::build(width, height, &params)?;
    println!(
        "{} tiles for {}x{} (tile {}, overlap {}):",
        grid.len(),
        width,
        height,
        params.tile_size,
        params.overlap
    );
    for origin in grid.origins() {
        println!("  ({}, {})", origin.x, origin.y);
    }

    if let Some(out) = &args.overlay {
        let mut raster = raster.ok_or("--overlay requires --image")?;
        draw_tile_grid(&mut raster, &grid);
        save_raster(out, &raster)?;
        println!("grid overlay: {}", out.display());
    }
    Ok(())
}

// ── annotate ───────────────────────────────────────────────────────────

fn run_annotate(args: &AnnotateArgs) -> CliResult<()> {
    let raster = load_raster(&args.image)?;
    let report: DetectReport = load_json(&args.report)?;

    let mut annotated = annotate(&raster, &report.detections);
    if args.draw_grid {
        let (width, height) = raster.dimensions();
        let grid = TileGrid::build(width, height, &report.params.tiling)?;
        log::debug!("grid rebuilt from report parameters: {} tiles", grid.len());
        draw_tile_grid(&mut annotated, &grid);
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| output_next_to(&args.image));
    save_raster(&output, &annotated)?;
    println!(
        "{} detections drawn to {}",
        report.detections.len(),
        output.display()
    );
    Ok(())
}

// ── geolocate ──────────────────────────────────────────────────────────

fn run_geolocate(args: &GeolocateArgs) -> CliResult<()> {
    let bounds = GeoBounds::new(args.south, args.west, args.north, args.east)?;
    let geo = GeoReference::new(bounds, args.width, args.height)?;
    let records = read_centers(&args.centers)?;

    for record in &records {
        let point = geo.lat_lon(record.x, record.y);
        println!(
            "{:.6},{:.6},{:.2} {}",
            point.lat,
            point.lon,
            record.confidence,
            point.maps_url()
        );
    }
    Ok(())
}
