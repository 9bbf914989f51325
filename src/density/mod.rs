//! Cell density grid over an integral image.
//!
//! Cells tile the image left-to-right, top-to-bottom; the last column and row
//! may be clipped partial cells. Each cell stores `ink / area` in `[0, 1]`.

pub mod threshold;

use crate::integral::IntegralImage;
use serde::Serialize;

pub use threshold::{percentile, AdaptiveThreshold};

/// Cell edge length: `max(16, min(w, h) / max(32, target_cells_across))`.
pub fn cell_size_for(width: usize, height: usize, target_cells_across: usize) -> usize {
    (width.min(height) / target_cells_across.max(32)).max(16)
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityGrid {
    pub cell_size: usize,
    pub cells_x: usize,
    pub cells_y: usize,
    /// Pixel dimensions of the partitioned image.
    pub width: usize,
    pub height: usize,
    #[serde(skip)]
    pub values: Vec<f64>,
}

impl DensityGrid {
    pub fn build(integral: &IntegralImage, cell_size: usize) -> Self {
        let cell_size = cell_size.max(1);
        let (w, h) = (integral.width(), integral.height());
        let cells_x = w.div_ceil(cell_size);
        let cells_y = h.div_ceil(cell_size);
        let mut values = vec![0.0; cells_x * cells_y];
        for cy in 0..cells_y {
            for cx in 0..cells_x {
                let (x0, y0, x1, y1) = cell_rect(cx, cy, cell_size, w, h);
                let area = (x1 - x0) * (y1 - y0);
                if area == 0 {
                    continue;
                }
                let ink = integral.rect_sum(x0, y0, x1, y1);
                values[cy * cells_x + cx] = ink as f64 / area as f64;
            }
        }
        Self {
            cell_size,
            cells_x,
            cells_y,
            width: w,
            height: h,
            values,
        }
    }

    #[inline]
    pub fn get(&self, cx: usize, cy: usize) -> f64 {
        self.values[cy * self.cells_x + cx]
    }

    /// Pixel rectangle `(x0, y0, x1, y1)` covered by a cell, clipped to the image.
    pub fn cell_rect(&self, cx: usize, cy: usize) -> (usize, usize, usize, usize) {
        cell_rect(cx, cy, self.cell_size, self.width, self.height)
    }

    /// Cells whose density meets `threshold`.
    pub fn dense_mask(&self, threshold: f64) -> Vec<bool> {
        self.values.iter().map(|&d| d >= threshold).collect()
    }
}

fn cell_rect(
    cx: usize,
    cy: usize,
    cell: usize,
    w: usize,
    h: usize,
) -> (usize, usize, usize, usize) {
    let x0 = cx * cell;
    let y0 = cy * cell;
    (x0, y0, (x0 + cell).min(w), (y0 + cell).min(h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::BackgroundColor;
    use crate::image::RasterRgba;

    #[test]
    fn cell_size_scales_with_image() {
        assert_eq!(cell_size_for(2000, 2000, 128), 16);
        assert_eq!(cell_size_for(4096, 3000, 128), 23);
        assert_eq!(cell_size_for(4096, 4096, 16), 128);
        assert_eq!(cell_size_for(100, 100, 128), 16);
    }

    #[test]
    fn weighted_densities_recover_ink_total() {
        let mut img = RasterRgba::from_pixel(70, 45, [255, 255, 255, 255]);
        img.fill_rect(5, 5, 30, 12, [0, 0, 0, 255]);
        img.fill_rect(60, 30, 20, 20, [0, 0, 0, 255]);
        let integral = IntegralImage::build(&img, BackgroundColor::WHITE, 25);
        let grid = DensityGrid::build(&integral, 16);
        assert_eq!((grid.cells_x, grid.cells_y), (5, 3));

        let mut weighted = 0.0;
        for cy in 0..grid.cells_y {
            for cx in 0..grid.cells_x {
                let (x0, y0, x1, y1) = grid.cell_rect(cx, cy);
                let d = grid.get(cx, cy);
                assert!((0.0..=1.0).contains(&d));
                weighted += d * ((x1 - x0) * (y1 - y0)) as f64;
            }
        }
        assert!((weighted - integral.total() as f64).abs() < 1e-6);
    }

    #[test]
    fn empty_image_has_no_cells() {
        let integral = IntegralImage::build(&RasterRgba::new(0, 0), BackgroundColor::WHITE, 25);
        let grid = DensityGrid::build(&integral, 16);
        assert!(grid.values.is_empty());
    }
}
