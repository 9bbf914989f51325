//! Score-based region filtering.
use super::types::Region;
use crate::integral::IntegralImage;
use log::debug;
use std::cmp::Ordering;

/// Thresholds applied by [`filter_regions`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionFilter {
    pub score_threshold_ratio: f64,
    pub max_regions: usize,
    /// Floor on the mean density of the cells a region covers.
    pub min_density: f64,
    /// Floor on the share of a region's pixels that are ink.
    pub min_fill_ratio: f64,
}

impl RegionFilter {
    /// Score cut and cap only; both floors disabled.
    pub fn new(score_threshold_ratio: f64, max_regions: usize) -> Self {
        Self {
            score_threshold_ratio,
            max_regions,
            min_density: 0.0,
            min_fill_ratio: 0.0,
        }
    }
}

/// Sort regions by descending score.
pub fn sort_by_score(regions: &mut [Region]) {
    regions.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

/// Mean cell density of `region`: its score over its area in cells.
pub fn mean_cell_density(region: &Region, cell_size: usize) -> f64 {
    let cell_area = (cell_size * cell_size).max(1) as f64;
    region.score * cell_area / region.area() as f64
}

/// Share of `region`'s pixels (clipped to the image) that are ink.
pub fn fill_ratio(region: &Region, integral: &IntegralImage) -> f64 {
    let clamp = |v: i64, hi: usize| v.clamp(0, hi as i64) as usize;
    let (w, h) = (integral.width(), integral.height());
    let (x0, y0) = (clamp(region.x, w), clamp(region.y, h));
    let (x1, y1) = (clamp(region.right(), w), clamp(region.bottom(), h));
    let area = (x1.saturating_sub(x0) * y1.saturating_sub(y0)) as f64;
    if area == 0.0 {
        return 0.0;
    }
    integral.rect_sum(x0, y0, x1, y1) as f64 / area
}

/// Filter regions found on the grid behind `integral`:
/// 1. drop regions under the density or fill-ratio floor;
/// 2. keep survivors scoring at least `best × score_threshold_ratio`;
/// 3. truncate to `max_regions`, best first.
///
/// A non-empty input always yields a non-empty output: the top region is
/// kept even if every cut would reject it, and `max_regions` of zero is
/// treated as one.
pub fn filter_regions(
    mut regions: Vec<Region>,
    filter: &RegionFilter,
    integral: &IntegralImage,
    cell_size: usize,
) -> Vec<Region> {
    if regions.is_empty() {
        return regions;
    }
    sort_by_score(&mut regions);
    let top = regions[0];
    let total = regions.len();

    let dense: Vec<Region> = regions
        .into_iter()
        .filter(|r| {
            mean_cell_density(r, cell_size) >= filter.min_density
                && fill_ratio(r, integral) >= filter.min_fill_ratio
        })
        .collect();
    if dense.len() < total {
        debug!(
            "filter_regions: {} of {} regions below density/fill floors",
            total - dense.len(),
            total
        );
    }

    let mut kept: Vec<Region> = match dense.first() {
        Some(best) => {
            let threshold = best.score * filter.score_threshold_ratio;
            dense.into_iter().filter(|r| r.score >= threshold).collect()
        }
        None => Vec::new(),
    };
    if kept.is_empty() {
        kept.push(top);
    }
    kept.truncate(filter.max_regions.max(1));
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::BackgroundColor;
    use crate::image::RasterRgba;

    fn blank_integral() -> IntegralImage {
        let img = RasterRgba::from_pixel(600, 100, [255, 255, 255, 255]);
        IntegralImage::build(&img, BackgroundColor::WHITE, 25)
    }

    fn descending(n: usize) -> Vec<Region> {
        (0..n)
            .map(|i| Region::new(i as i64 * 100, 0, 50, 50, (n - i) as f64))
            .collect()
    }

    #[test]
    fn max_regions_one_keeps_the_best() {
        let mut regions = descending(5);
        regions.reverse();
        let kept = filter_regions(regions, &RegionFilter::new(0.0, 1), &blank_integral(), 16);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].score, 5.0);
    }

    #[test]
    fn ratio_drops_weak_regions() {
        let kept = filter_regions(descending(5), &RegionFilter::new(0.5, 12), &blank_integral(), 16);
        let scores: Vec<f64> = kept.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![5.0, 4.0, 3.0]);
    }

    #[test]
    fn never_empty_for_non_empty_input() {
        let integral = blank_integral();
        // NaN threshold rejects everything, the top region survives anyway
        let kept = filter_regions(descending(3), &RegionFilter::new(f64::NAN, 12), &integral, 16);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].score, 3.0);
        assert_eq!(filter_regions(descending(3), &RegionFilter::new(0.1, 0), &integral, 16).len(), 1);
        assert!(filter_regions(Vec::new(), &RegionFilter::new(0.1, 3), &integral, 16).is_empty());
    }

    #[test]
    fn density_floor_drops_thin_regions() {
        // 64x64 px = 16 cells of 16 px
        let regions = vec![
            Region::new(0, 0, 64, 64, 8.0),   // mean 0.5
            Region::new(100, 0, 64, 64, 1.6), // mean 0.1
            Region::new(200, 0, 64, 64, 4.0), // mean 0.25
        ];
        assert_eq!(mean_cell_density(&regions[1], 16), 0.1);
        let filter = RegionFilter {
            min_density: 0.2,
            ..RegionFilter::new(0.0, 12)
        };
        let kept = filter_regions(regions, &filter, &blank_integral(), 16);
        let xs: Vec<i64> = kept.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![0, 200]);
    }

    #[test]
    fn fill_ratio_floor_counts_ink_pixels() {
        let mut img = RasterRgba::from_pixel(300, 100, [255, 255, 255, 255]);
        img.fill_rect(0, 0, 50, 20, [0, 0, 0, 255]); // 1000 of 2500 px
        img.fill_rect(100, 0, 50, 5, [0, 0, 0, 255]); // 250 of 2500 px
        let integral = IntegralImage::build(&img, BackgroundColor::WHITE, 25);
        let regions = vec![
            Region::new(0, 0, 50, 50, 1.0),
            Region::new(100, 0, 50, 50, 2.0),
        ];
        assert_eq!(fill_ratio(&regions[0], &integral), 0.4);
        assert_eq!(fill_ratio(&regions[1], &integral), 0.1);

        let filter = RegionFilter {
            min_fill_ratio: 0.25,
            ..RegionFilter::new(0.0, 12)
        };
        let kept = filter_regions(regions.clone(), &filter, &integral, 16);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].x, 0);

        // the weaker, sparser region is gone before the score cut runs
        let filter = RegionFilter {
            min_fill_ratio: 0.25,
            ..RegionFilter::new(0.9, 12)
        };
        assert_eq!(filter_regions(regions, &filter, &integral, 16)[0].score, 1.0);
    }

    #[test]
    fn floors_never_empty_the_result() {
        let filter = RegionFilter {
            min_fill_ratio: 0.5,
            ..RegionFilter::new(0.0, 12)
        };
        let kept = filter_regions(descending(3), &filter, &blank_integral(), 16);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].score, 3.0);
    }
}
