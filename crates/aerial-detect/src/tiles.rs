//! Tile extraction from a source raster.

use image::{imageops, RgbImage};

use aerial_detect_core::TileOrigin;

/// Crops the square tile anchored at `origin` into an owned buffer.
///
/// Origins come from a `TileGrid` built for this raster, so the region is
/// always in bounds.
pub fn crop_tile(raster: &RgbImage, origin: TileOrigin, tile_size: u32) -> RgbImage {
    imageops::crop_imm(raster, origin.x, origin.y, tile_size, tile_size).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 0])
        })
    }

    #[test]
    fn tile_pixels_match_source_region() {
        let raster = gradient(1280, 1280);
        let tile = crop_tile(&raster, TileOrigin::new(540, 640), 640);
        assert_eq!(tile.dimensions(), (640, 640));
        assert_eq!(tile.get_pixel(0, 0), raster.get_pixel(540, 640));
        assert_eq!(tile.get_pixel(99, 7), raster.get_pixel(639, 647));
        assert_eq!(tile.get_pixel(639, 639), raster.get_pixel(1179, 1279));
    }

    #[test]
    fn crop_owns_its_pixels() {
        let mut raster = gradient(64, 64);
        let tile = crop_tile(&raster, TileOrigin::new(0, 0), 32);
        raster.put_pixel(0, 0, Rgb([255, 255, 255]));
        assert_eq!(*tile.get_pixel(0, 0), Rgb([0, 0, 0]));
    }
}
