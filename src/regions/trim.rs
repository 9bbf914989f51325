//! Shrinking regions to the ink they actually contain.
//!
//! On the analysis level the summed-area table answers the query. A region
//! lifted from a subsampled level is trimmed against the full-resolution
//! raster instead: ink lying between sampled pixels never reached the table.
use super::types::Region;
use crate::background::BackgroundColor;
use crate::image::{ImageView, Rgba};
use crate::integral::{is_ink, IntegralImage};

/// Tight ink bounding box of `region` (in the integral image's pixel space).
///
/// A region without ink, or one lying outside the image, is returned as is.
pub fn trim_to_ink(region: &Region, integral: &IntegralImage) -> Region {
    let clamp = |v: i64, hi: usize| v.clamp(0, hi as i64) as usize;
    let (w, h) = (integral.width(), integral.height());
    let x0 = clamp(region.x, w);
    let y0 = clamp(region.y, h);
    let x1 = clamp(region.right(), w);
    let y1 = clamp(region.bottom(), h);
    match integral.ink_bounds(x0, y0, x1, y1) {
        Some((l, t, r, b)) => Region::new(
            l as i64,
            t as i64,
            (r - l) as i64,
            (b - t) as i64,
            region.score,
        ),
        None => *region,
    }
}

/// Tight ink bounding box of `region` found by scanning `image` directly.
///
/// Same contract as [`trim_to_ink`]; costs one pass over the region's pixels.
pub fn trim_to_ink_scan<I: ImageView<Pixel = Rgba>>(
    region: &Region,
    image: &I,
    bg: BackgroundColor,
    bg_delta: u32,
) -> Region {
    let clamp = |v: i64, hi: usize| v.clamp(0, hi as i64) as usize;
    let (w, h) = (image.width(), image.height());
    let x0 = clamp(region.x, w);
    let y0 = clamp(region.y, h);
    let x1 = clamp(region.right(), w);
    let y1 = clamp(region.bottom(), h);
    if x0 >= x1 {
        return *region;
    }

    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for y in y0..y1 {
        let row = &image.row(y)[x0..x1];
        let Some(first) = row.iter().position(|&px| is_ink(px, bg, bg_delta)) else {
            continue;
        };
        let last = row
            .iter()
            .rposition(|&px| is_ink(px, bg, bg_delta))
            .unwrap_or(first);
        let (l, r) = (x0 + first, x0 + last + 1);
        bounds = Some(match bounds {
            None => (l, y, r, y + 1),
            Some((bl, bt, br, _)) => (bl.min(l), bt, br.max(r), y + 1),
        });
    }
    match bounds {
        Some((l, t, r, b)) => Region::new(
            l as i64,
            t as i64,
            (r - l) as i64,
            (b - t) as i64,
            region.score,
        ),
        None => *region,
    }
}
