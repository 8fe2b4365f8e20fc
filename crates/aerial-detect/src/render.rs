//! Rendering of detection boxes, confidence captions, and grid overlays.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use aerial_detect_core::{Detection, TileGrid};

/// Detection boxes and captions are green, the tile grid blue.
const DETECTION_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const GRID_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const BOX_THICKNESS: i32 = 3;
const GRID_THICKNESS: i32 = 2;

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const GLYPH_SCALE: u32 = 2;

/// Returns a copy of `raster` with every detection drawn as a hollow box
/// plus its confidence captioned above the top-left corner. The input is
/// left untouched.
pub fn annotate(raster: &RgbImage, detections: &[Detection]) -> RgbImage {
    let mut out = raster.clone();
    for detection in detections {
        draw_detection(&mut out, detection);
    }
    out
}

/// Draws one detection box and its confidence caption in place.
pub fn draw_detection(img: &mut RgbImage, detection: &Detection) {
    let x = detection.bbox.x1.round() as i32;
    let y = detection.bbox.y1.round() as i32;
    let w = detection.bbox.width().round() as i32;
    let h = detection.bbox.height().round() as i32;
    draw_thick_rect(img, x, y, w, h, DETECTION_COLOR, BOX_THICKNESS);

    let caption = format!("{:.2}", detection.confidence);
    let caption_y = (y - (GLYPH_HEIGHT * GLYPH_SCALE) as i32 - 3).max(0);
    draw_caption(img, x, caption_y, &caption, DETECTION_COLOR);
}

/// Draws every tile boundary of `grid`. Pass the grid the raster was
/// actually processed with so the overlay cannot drift from the tiling.
pub fn draw_tile_grid(img: &mut RgbImage, grid: &TileGrid) {
    let size = grid.tile_size() as i32;
    for origin in grid.origins() {
        draw_thick_rect(
            img,
            origin.x as i32,
            origin.y as i32,
            size,
            size,
            GRID_COLOR,
            GRID_THICKNESS,
        );
    }
}

/// Hollow rectangle thickened inward so it stays inside the box region.
fn draw_thick_rect(
    img: &mut RgbImage,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    color: Rgb<u8>,
    thickness: i32,
) {
    for t in 0..thickness {
        let rw = w - 2 * t;
        let rh = h - 2 * t;
        if rw <= 0 || rh <= 0 {
            break;
        }
        draw_hollow_rect_mut(
            img,
            Rect::at(x + t, y + t).of_size(rw as u32, rh as u32),
            color,
        );
    }
}

/// Blits `text` from the built-in 5x7 strip (digits and '.'); characters
/// outside the strip advance the cursor without drawing. Pixels falling
/// outside the image are dropped.
fn draw_caption(img: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
    let (width, height) = img.dimensions();
    let mut cursor = x;
    for ch in text.chars() {
        if let Some(rows) = glyph(ch) {
            for (gy, row) in rows.iter().enumerate() {
                for gx in 0..GLYPH_WIDTH {
                    if row & (0x10 >> gx) == 0 {
                        continue;
                    }
                    for sy in 0..GLYPH_SCALE {
                        for sx in 0..GLYPH_SCALE {
                            let px = cursor + (gx * GLYPH_SCALE + sx) as i32;
                            let py = y + (gy as u32 * GLYPH_SCALE + sy) as i32;
                            if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                                img.put_pixel(px as u32, py as u32, color);
                            }
                        }
                    }
                }
            }
        }
        cursor += ((GLYPH_WIDTH + 1) * GLYPH_SCALE) as i32;
    }
}

/// 5x7 dot-matrix rows, bit 4 is the leftmost column.
fn glyph(ch: char) -> Option<&'static [u8; 7]> {
    const DIGITS: [[u8; 7]; 10] = [
        [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
    ];
    const DOT: [u8; 7] = [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C];
    match ch {
        '0'..='9' => {
            let idx = ch as usize - '0' as usize;
            Some(&DIGITS[idx])
        }
        '.' => Some(&DOT),
        _ => None,
    }
}
