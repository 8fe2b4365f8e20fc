//! Overlapping tile grids with guaranteed edge coverage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tile edge length and inter-tile overlap, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilingParams {
    /// Edge length of the square tiles.
    pub tile_size: u32,
    /// Width of the band shared between neighboring tiles along each axis.
    /// Must stay below `tile_size` so the grid can advance.
    pub overlap: u32,
}

impl Default for TilingParams {
    fn default() -> Self {
        Self {
            tile_size: 640,
            overlap: 100,
        }
    }
}

impl TilingParams {
    pub fn new(tile_size: u32, overlap: u32) -> Self {
        Self { tile_size, overlap }
    }

    /// Stride between neighboring tile origins. Positive once validated.
    #[inline]
    pub fn step(&self) -> u32 {
        self.tile_size - self.overlap
    }

    pub fn validate(&self) -> Result<(), TilingError> {
        if self.tile_size == 0 || self.overlap >= self.tile_size {
            return Err(TilingError::InvalidConfiguration {
                tile_size: self.tile_size,
                overlap: self.overlap,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum TilingError {
    #[error(
        "invalid tiling configuration: tile_size={tile_size}, overlap={overlap} \
         (tile_size must be positive and overlap smaller than tile_size)"
    )]
    InvalidConfiguration { tile_size: u32, overlap: u32 },

    #[error("raster {width}x{height} cannot fit one {tile_size}x{tile_size} tile")]
    RasterTooSmall {
        width: u32,
        height: u32,
        tile_size: u32,
    },
}

/// Top-left corner of a tile in the source raster frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileOrigin {
    pub x: u32,
    pub y: u32,
}

impl TileOrigin {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Ordered tile origins covering one raster.
///
/// Regular origins advance with stride `tile_size - overlap` in raster-scan
/// order. When the stride does not land exactly on the far edge, extra
/// origins snapped to `width - tile_size` (and `height - tile_size`) are
/// appended so the border stays covered; those may duplicate coverage near
/// the edge, which suppression resolves downstream. The same grid instance
/// drives both tile cropping and any grid overlay drawing.
#[derive(Debug, Clone)]
pub struct TileGrid {
    origins: Vec<TileOrigin>,
    tile_size: u32,
    width: u32,
    height: u32,
}

impl TileGrid {
    /// Plans the grid for a `width` x `height` raster.
    pub fn build(width: u32, height: u32, params: &TilingParams) -> Result<Self, TilingError> {
        params.validate()?;
        let tile = params.tile_size;
        if width < tile || height < tile {
            return Err(TilingError::RasterTooSmall {
                width,
                height,
                tile_size: tile,
            });
        }

        let step = params.step();
        let xs: Vec<u32> = (0..=width - tile).step_by(step as usize).collect();
        let ys: Vec<u32> = (0..=height - tile).step_by(step as usize).collect();

        let mut origins = Vec::with_capacity((xs.len() + 1) * (ys.len() + 1));
        for &y in &ys {
            for &x in &xs {
                origins.push(TileOrigin { x, y });
            }
        }

        // A snapped strip is needed exactly when the last regular origin
        // stops short of the far edge.
        let snap_right = (width - tile) % step != 0;
        let snap_bottom = (height - tile) % step != 0;
        if snap_right {
            let x = width - tile;
            for &y in &ys {
                origins.push(TileOrigin { x, y });
            }
        }
        if snap_bottom {
            let y = height - tile;
            for &x in &xs {
                origins.push(TileOrigin { x, y });
            }
        }
        if snap_right && snap_bottom {
            origins.push(TileOrigin {
                x: width - tile,
                y: height - tile,
            });
        }

        Ok(Self {
            origins,
            tile_size: tile,
            width,
            height,
        })
    }

    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    #[inline]
    pub fn raster_width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn raster_height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    pub fn origins(&self) -> impl Iterator<Item = TileOrigin> + '_ {
        self.origins.iter().copied()
    }

    pub fn as_slice(&self) -> &[TileOrigin] {
        &self.origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin_list(grid: &TileGrid) -> Vec<(u32, u32)> {
        grid.origins().map(|o| (o.x, o.y)).collect()
    }

    #[test]
    fn rejects_zero_tile_size() {
        let err = TileGrid::build(100, 100, &TilingParams::new(0, 0)).unwrap_err();
        assert!(matches!(err, TilingError::InvalidConfiguration { .. }));
    }

    #[test]
    fn rejects_overlap_reaching_tile_size() {
        let err = TileGrid::build(100, 100, &TilingParams::new(32, 32)).unwrap_err();
        assert!(matches!(err, TilingError::InvalidConfiguration { .. }));
        // One below is fine: step stays positive.
        let params = TilingParams::new(32, 31);
        assert_eq!(params.step(), 1);
        assert!(TileGrid::build(100, 100, &params).is_ok());
    }

    #[test]
    fn rejects_raster_smaller_than_tile() {
        let err = TileGrid::build(639, 1280, &TilingParams::default()).unwrap_err();
        match err {
            TilingError::RasterTooSmall {
                width, tile_size, ..
            } => {
                assert_eq!(width, 639);
                assert_eq!(tile_size, 640);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn square_1280_grid_snaps_edge_tiles() {
        let grid = TileGrid::build(1280, 1280, &TilingParams::default()).unwrap();
        // Regular stride 540 reaches 0 and 540; the snapped strip sits at
        // 1280 - 640 = 640 on both axes.
        let expected = vec![
            (0, 0),
            (540, 0),
            (0, 540),
            (540, 540),
            (640, 0),
            (640, 540),
            (0, 640),
            (540, 640),
            (640, 640),
        ];
        assert_eq!(origin_list(&grid), expected);

        let mut xs: Vec<u32> = grid.origins().map(|o| o.x).collect();
        xs.sort_unstable();
        xs.dedup();
        assert_eq!(xs, vec![0, 540, 640]);
    }

    #[test]
    fn regular_origins_come_first_in_raster_scan_order() {
        let grid = TileGrid::build(1780, 1200, &TilingParams::new(640, 100)).unwrap();
        let origins = origin_list(&grid);
        // Regular stride 540: xs 0, 540, 1080 (1080 + 640 fits in 1780),
        // ys 0, 540. The first raster-scan row comes back intact.
        assert_eq!(&origins[..3], &[(0, 0), (540, 0), (1080, 0)]);
        assert_eq!(origins[3], (0, 540));
        // Everything after the regular block touches an edge.
        let regular = 3 * 2;
        assert_eq!(origins.len(), regular + 2 + 3 + 1);
        for &(x, y) in &origins[regular..] {
            assert!(x == 1780 - 640 || y == 1200 - 640);
        }
    }

    #[test]
    fn single_tile_raster_emits_one_origin() {
        let grid = TileGrid::build(640, 640, &TilingParams::default()).unwrap();
        assert_eq!(origin_list(&grid), vec![(0, 0)]);
    }

    #[test]
    fn exact_stride_fit_needs_no_snapped_tiles() {
        // The last regular origin at 540 already reaches the far edge
        // (540 + 640 = 1180), so no strip is appended.
        let grid = TileGrid::build(1180, 1180, &TilingParams::default()).unwrap();
        assert_eq!(
            origin_list(&grid),
            vec![(0, 0), (540, 0), (0, 540), (540, 540)]
        );
    }

    #[test]
    fn snaps_edge_tiles_when_dimension_is_multiple_of_step() {
        // 1080 is a multiple of the 540 stride, yet the regular grid's only
        // origin is 0 and covers columns 0..640; the snapped strip at
        // 1080 - 640 = 440 picks up the rest.
        let grid = TileGrid::build(1080, 1080, &TilingParams::default()).unwrap();
        assert_eq!(
            origin_list(&grid),
            vec![(0, 0), (440, 0), (0, 440), (440, 440)]
        );
        assert!(grid
            .origins()
            .any(|o| o.x <= 1000 && o.x + grid.tile_size() > 1000));
    }

    #[test]
    fn every_pixel_is_covered() {
        let cases = [
            (64, 64, 32, 8),
            (65, 97, 32, 8),
            (100, 50, 50, 10),
            (129, 128, 64, 63),
            (1080, 1080, 640, 100),
            (1280, 1280, 640, 100),
        ];
        for (width, height, tile, overlap) in cases {
            let grid = TileGrid::build(width, height, &TilingParams::new(tile, overlap)).unwrap();
            let mut covered = vec![false; (width * height) as usize];
            for o in grid.origins() {
                assert!(o.x + tile <= width && o.y + tile <= height);
                for y in o.y..o.y + tile {
                    for x in o.x..o.x + tile {
                        covered[(y * width + x) as usize] = true;
                    }
                }
            }
            assert!(
                covered.iter().all(|&c| c),
                "uncovered pixels for {width}x{height} tile={tile} overlap={overlap}"
            );
        }
    }

    #[test]
    fn params_round_trip_through_json() {
        let params = TilingParams::new(512, 64);
        let text = serde_json::to_string(&params).unwrap();
        let back: TilingParams = serde_json::from_str(&text).unwrap();
        assert_eq!(back, params);
    }
}
