//! Dense-cell components to pixel regions.
use super::components::{label_components, BoolGrid, LabelOptions};
use super::types::Region;
use crate::density::DensityGrid;
use log::debug;

/// Find regions of connected dense cells.
///
/// Each component's cell range is grown by `margin_cells` before conversion
/// to pixels, and components whose post-margin pixel area is below
/// `min_region_pixels` are dropped. `min_region_pixels` is in the pixel space
/// of `grid`; callers working on a reduced level pre-scale it.
pub fn find_regions(
    grid: &DensityGrid,
    dense: &[bool],
    margin_cells: usize,
    min_region_pixels: usize,
) -> Vec<Region> {
    let mask = BoolGrid::from_cells(grid.cells_x, grid.cells_y, dense.to_vec());
    let components = label_components(
        &mask,
        Some(&grid.values),
        LabelOptions {
            dilate_radius: 0,
            margin: margin_cells,
        },
    );

    let cs = grid.cell_size as i64;
    let (img_w, img_h) = (grid.width as i64, grid.height as i64);
    let total = components.len();
    let regions: Vec<Region> = components
        .into_iter()
        .filter_map(|c| {
            let b = c.expanded;
            let x0 = b.min_x as i64 * cs;
            let y0 = b.min_y as i64 * cs;
            let x1 = img_w.min((b.max_x as i64 + 1) * cs);
            let y1 = img_h.min((b.max_y as i64 + 1) * cs);
            let region = Region::new(x0, y0, x1 - x0, y1 - y0, c.score);
            (region.area() >= min_region_pixels as i64).then_some(region)
        })
        .collect();
    debug!(
        "find_regions: {} components, {} above {} px",
        total,
        regions.len(),
        min_region_pixels
    );
    regions
}
