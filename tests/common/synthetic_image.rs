use drawing_compactor::image::{RasterRgba, Rgba};

pub const WHITE: Rgba = [255, 255, 255, 255];
pub const BLACK: Rgba = [0, 0, 0, 255];
pub const TRANSPARENT_BLACK: Rgba = [0, 0, 0, 0];

/// Uniform white sheet.
pub fn blank_sheet(width: usize, height: usize) -> RasterRgba {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    RasterRgba::from_pixel(width, height, WHITE)
}

/// White sheet with solid black blocks `(x, y, w, h)`.
pub fn sheet_with_blocks(width: usize, height: usize, blocks: &[(usize, usize, usize, usize)]) -> RasterRgba {
    let mut img = blank_sheet(width, height);
    for &(x, y, w, h) in blocks {
        img.fill_rect(x, y, w, h, BLACK);
    }
    img
}

/// Sparse dot lattice: one ink pixel every `step` pixels on both axes.
pub fn paint_dots(img: &mut RasterRgba, x0: usize, y0: usize, w: usize, h: usize, step: usize) {
    assert!(step > 0, "step must be positive");
    for y in (y0..(y0 + h).min(img.h)).step_by(step) {
        for x in (x0..(x0 + w).min(img.w)).step_by(step) {
            img.set(x, y, BLACK);
        }
    }
}
