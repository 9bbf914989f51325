//! Ink classification and summed-area table.
//!
//! A pixel is ink when it is not fully transparent and its L1 RGB distance to
//! the background exceeds `bg_delta`. The table stores
//! `integral[y][x] = integral[y-1][x] + Σ ink(0..x-1, y-1)` over a
//! `(h+1) × (w+1)` grid, so any rectangle sum is four lookups.
use crate::background::BackgroundColor;
use crate::image::{ImageView, Rgba};

#[inline]
pub fn is_ink(px: Rgba, bg: BackgroundColor, bg_delta: u32) -> bool {
    px[3] > 0 && bg.l1_distance(px) > bg_delta
}

/// Read-only summed-area table of ink pixels.
#[derive(Clone, Debug)]
pub struct IntegralImage {
    width: usize,
    height: usize,
    /// Row-major `(height + 1) × (width + 1)` prefix sums.
    sums: Vec<u32>,
}

impl IntegralImage {
    pub fn build<I: ImageView<Pixel = Rgba>>(
        image: &I,
        bg: BackgroundColor,
        bg_delta: u32,
    ) -> Self {
        let (w, h) = (image.width(), image.height());
        let stride = w + 1;
        let mut sums = vec![0u32; stride * (h + 1)];
        for y in 1..=h {
            let src = image.row(y - 1);
            let mut row_sum = 0u32;
            for x in 1..=w {
                row_sum += is_ink(src[x - 1], bg, bg_delta) as u32;
                sums[y * stride + x] = sums[(y - 1) * stride + x] + row_sum;
            }
        }
        Self {
            width: w,
            height: h,
            sums,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn at(&self, x: usize, y: usize) -> u32 {
        self.sums[y * (self.width + 1) + x]
    }

    /// Ink count in the half-open rectangle `[x0, x1) × [y0, y1)`.
    ///
    /// Coordinates are clamped to the image; inverted ranges sum to zero.
    #[inline]
    pub fn rect_sum(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> u32 {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return 0;
        }
        self.at(x1, y1) + self.at(x0, y0) - self.at(x1, y0) - self.at(x0, y1)
    }

    pub fn total(&self) -> u32 {
        self.at(self.width, self.height)
    }

    /// Tight bounding box `(x0, y0, x1, y1)` of the ink inside the given
    /// rectangle, or `None` if it holds no ink.
    pub fn ink_bounds(
        &self,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
    ) -> Option<(usize, usize, usize, usize)> {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        if self.rect_sum(x0, y0, x1, y1) == 0 {
            return None;
        }
        // each bound is the first column/row where the cumulative sum moves
        let left = first_true(x0, x1, |x| self.rect_sum(x0, y0, x + 1, y1) > 0);
        let right = first_true(x0, x1, |x| self.rect_sum(x + 1, y0, x1, y1) == 0) + 1;
        let top = first_true(y0, y1, |y| self.rect_sum(x0, y0, x1, y + 1) > 0);
        let bottom = first_true(y0, y1, |y| self.rect_sum(x0, y + 1, x1, y1) == 0) + 1;
        Some((left, top, right, bottom))
    }
}

/// Smallest `v` in `[lo, hi)` where the monotone predicate holds (`hi - 1` if none).
fn first_true(lo: usize, hi: usize, pred: impl Fn(usize) -> bool) -> usize {
    let (mut lo, mut hi) = (lo, hi - 1);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::RasterRgba;

    const BLACK: Rgba = [0, 0, 0, 255];

    fn sample() -> RasterRgba {
        let mut img = RasterRgba::from_pixel(37, 23, [255, 255, 255, 255]);
        img.fill_rect(3, 4, 10, 5, BLACK);
        img.fill_rect(30, 20, 10, 10, BLACK);
        img.set(20, 1, [0, 0, 0, 0]); // transparent never counts
        img.set(21, 1, [250, 250, 250, 255]); // within tolerance
        img
    }

    #[test]
    fn whole_image_sum_equals_ink_count() {
        let img = sample();
        let integral = IntegralImage::build(&img, BackgroundColor::WHITE, 25);
        let expected = img
            .data
            .iter()
            .filter(|&&p| is_ink(p, BackgroundColor::WHITE, 25))
            .count() as u32;
        assert_eq!(integral.total(), expected);
        assert_eq!(integral.total(), 50 + 7 * 3);
    }

    #[test]
    fn rect_sums_match_brute_force() {
        let img = sample();
        let integral = IntegralImage::build(&img, BackgroundColor::WHITE, 25);
        for &(x0, y0, x1, y1) in &[(0, 0, 5, 5), (4, 5, 31, 22), (12, 8, 13, 9), (30, 20, 37, 23)] {
            let mut brute = 0;
            for y in y0..y1 {
                for x in x0..x1 {
                    brute += is_ink(img.get(x, y), BackgroundColor::WHITE, 25) as u32;
                }
            }
            assert_eq!(integral.rect_sum(x0, y0, x1, y1), brute, "rect {x0},{y0},{x1},{y1}");
            assert!(brute as usize <= (x1 - x0) * (y1 - y0));
        }
    }

    #[test]
    fn distance_must_exceed_tolerance() {
        let bg = BackgroundColor::new(100, 100, 100);
        assert!(!is_ink([110, 110, 105, 255], bg, 25));
        assert!(is_ink([110, 110, 106, 255], bg, 25));
    }

    #[test]
    fn ink_bounds_are_tight() {
        let img = sample();
        let integral = IntegralImage::build(&img, BackgroundColor::WHITE, 25);
        assert_eq!(integral.ink_bounds(0, 0, 20, 20), Some((3, 4, 13, 9)));
        assert_eq!(integral.ink_bounds(25, 15, 37, 23), Some((30, 20, 37, 23)));
        assert_eq!(integral.ink_bounds(14, 10, 29, 19), None);
    }
}
