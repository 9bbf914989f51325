//! Background colour estimation from the four image corners.
//!
//! Large-format drawings are dominated by their paper colour at the borders,
//! so the mode of the corner samples is a cheap and robust estimate. Samples
//! are compared as exact packed colours; among equally frequent colours the
//! smallest packed value wins.
use crate::image::{ImageView, Rgba};
use serde::Serialize;

/// Background colour (alpha is not part of the estimate).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct BackgroundColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BackgroundColor {
    pub const WHITE: BackgroundColor = BackgroundColor::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// L1 distance in RGB space.
    #[inline]
    pub fn l1_distance(&self, px: Rgba) -> u32 {
        (px[0] as i32 - self.r as i32).unsigned_abs()
            + (px[1] as i32 - self.g as i32).unsigned_abs()
            + (px[2] as i32 - self.b as i32).unsigned_abs()
    }
}

/// Edge length of each corner window: `clamp(min(w, h) / 50, 8, 48)`.
pub fn corner_sample_size(width: usize, height: usize) -> usize {
    (width.min(height) / 50).clamp(8, 48)
}

/// Estimate the dominant background colour of `image`.
///
/// Never fails: an image without pixels yields opaque black.
pub fn estimate_background<I: ImageView<Pixel = Rgba>>(image: &I) -> BackgroundColor {
    if image.is_empty() {
        return BackgroundColor::default();
    }
    let (w, h) = (image.width(), image.height());
    let size = corner_sample_size(w, h);
    let origins = [
        (0isize, 0isize),
        (w as isize - size as isize, 0),
        (0, h as isize - size as isize),
        (w as isize - size as isize, h as isize - size as isize),
    ];

    let mut samples: Vec<u32> = Vec::with_capacity(size * size * 4);
    for (sx, sy) in origins {
        sample_corner(image, sx, sy, size, &mut samples);
    }
    samples.sort_unstable();

    let mut best = samples[0];
    let mut best_count = 1usize;
    let mut cur = samples[0];
    let mut cur_count = 1usize;
    for &s in &samples[1..] {
        if s == cur {
            cur_count += 1;
            if cur_count > best_count {
                best_count = cur_count;
                best = cur;
            }
        } else {
            cur = s;
            cur_count = 1;
        }
    }
    unpack(best)
}

fn sample_corner<I: ImageView<Pixel = Rgba>>(
    image: &I,
    sx: isize,
    sy: isize,
    size: usize,
    out: &mut Vec<u32>,
) {
    let (w, h) = (image.width() as isize, image.height() as isize);
    let x0 = sx.clamp(0, w - 1) as usize;
    let y0 = sy.clamp(0, h - 1) as usize;
    let x1 = (sx + size as isize).clamp(0, w) as usize;
    let y1 = (sy + size as isize).clamp(0, h) as usize;
    for y in y0..y1 {
        out.extend(image.row(y)[x0..x1].iter().map(|&px| pack(px)));
    }
}

#[inline]
fn pack(px: Rgba) -> u32 {
    u32::from_be_bytes([px[3], px[0], px[1], px[2]])
}

#[inline]
fn unpack(v: u32) -> BackgroundColor {
    let [_, r, g, b] = v.to_be_bytes();
    BackgroundColor { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::RasterRgba;

    #[test]
    fn sample_size_is_clamped() {
        assert_eq!(corner_sample_size(100, 100), 8);
        assert_eq!(corner_sample_size(2000, 1000), 20);
        assert_eq!(corner_sample_size(10_000, 9_000), 48);
    }

    #[test]
    fn dominant_corner_colour_wins() {
        let mut img = RasterRgba::from_pixel(400, 300, [250, 250, 240, 255]);
        // ink touching one corner must not change the estimate
        img.fill_rect(0, 0, 5, 5, [0, 0, 0, 255]);
        img.fill_rect(100, 100, 200, 100, [0, 0, 0, 255]);
        assert_eq!(estimate_background(&img), BackgroundColor::new(250, 250, 240));
    }

    #[test]
    fn ties_resolve_to_smallest_packed_colour() {
        let mut img = RasterRgba::from_pixel(16, 16, [200, 0, 0, 255]);
        img.fill_rect(0, 0, 16, 8, [10, 0, 0, 255]);
        assert_eq!(estimate_background(&img), BackgroundColor::new(10, 0, 0));
    }

    #[test]
    fn tiny_and_empty_images_do_not_panic() {
        let img = RasterRgba::from_pixel(1, 1, [7, 8, 9, 255]);
        assert_eq!(estimate_background(&img), BackgroundColor::new(7, 8, 9));
        assert_eq!(
            estimate_background(&RasterRgba::new(0, 0)),
            BackgroundColor::default()
        );
    }
}
