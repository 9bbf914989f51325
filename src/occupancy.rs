//! Occupancy analysis of world-space entity boxes.
//!
//! Boxes are rasterised onto a coarse grid that preserves the domain aspect
//! ratio, bridged with one cell of dilation, and labelled into components.
//! Boxes spanning more than half the domain on either axis are frames or
//! borders and do not mark occupancy, but they still count towards the total
//! extents.
use crate::coords::WorldExtents;
use crate::regions::{label_components, BoolGrid, LabelOptions};
use log::debug;
use serde::Serialize;

/// Upper bound on either grid dimension.
pub const MAX_GRID_DIM: usize = 2000;

/// Domains thinner than this on either axis yield no components.
const MIN_DOMAIN_EXTENT: f64 = 1e-6;

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyResult {
    /// Union of every valid input box, `None` when there were none.
    pub total_extents: Option<WorldExtents>,
    /// One world box per surviving component, in grid scan order.
    pub regions: Vec<WorldExtents>,
    pub grid_width: usize,
    pub grid_height: usize,
    /// Boxes dropped as invalid.
    pub skipped_invalid: usize,
    /// Boxes excluded from marking as frame-sized.
    pub skipped_frames: usize,
}

/// Grid shape for a `width × height` domain: the shorter axis gets
/// `base_resolution` cells, each axis capped at [`MAX_GRID_DIM`].
pub fn grid_dimensions(width: f64, height: f64, base_resolution: usize) -> (usize, usize) {
    let base = base_resolution.max(1);
    let aspect = width / height;
    let (gw, gh) = if aspect >= 1.0 {
        ((base as f64 * aspect).ceil() as usize, base)
    } else {
        (base, (base as f64 / aspect).ceil() as usize)
    };
    (gw.clamp(1, MAX_GRID_DIM), gh.clamp(1, MAX_GRID_DIM))
}

/// Find occupied areas of a set of entity boxes.
pub fn analyze_boxes(boxes: &[WorldExtents], base_resolution: usize) -> OccupancyResult {
    let valid: Vec<WorldExtents> = boxes.iter().copied().filter(|b| b.is_valid()).collect();
    let mut result = OccupancyResult {
        total_extents: WorldExtents::enclosing(&valid),
        skipped_invalid: boxes.len() - valid.len(),
        ..Default::default()
    };
    let Some(total) = result.total_extents else {
        return result;
    };
    let (width, height) = (total.width(), total.height());
    if width <= MIN_DOMAIN_EXTENT || height <= MIN_DOMAIN_EXTENT {
        return result;
    }

    let (gw, gh) = grid_dimensions(width, height, base_resolution);
    let cell_w = width / gw as f64;
    let cell_h = height / gh as f64;
    let to_cell = |v: f64, origin: f64, cell: f64, n: usize| {
        let c = ((v - origin) / cell) as i64;
        c.clamp(0, n as i64 - 1) as usize
    };

    let mut grid = BoolGrid::new(gw, gh);
    for b in &valid {
        if b.width() > width * 0.5 || b.height() > height * 0.5 {
            result.skipped_frames += 1;
            continue;
        }
        let x0 = to_cell(b.min.x, total.min.x, cell_w, gw);
        let x1 = to_cell(b.max.x, total.min.x, cell_w, gw);
        let y0 = to_cell(b.min.y, total.min.y, cell_h, gh);
        let y1 = to_cell(b.max.y, total.min.y, cell_h, gh);
        for y in y0..=y1 {
            for x in x0..=x1 {
                grid.set(x, y, true);
            }
        }
    }

    let components = label_components(
        &grid,
        None,
        LabelOptions {
            dilate_radius: 1,
            margin: 0,
        },
    );
    let found = components.len();
    result.regions = components
        .into_iter()
        .filter(|c| c.bounds.width() >= 2 || c.bounds.height() >= 2)
        .map(|c| {
            let b = c.bounds;
            WorldExtents::new(
                total.min.x + b.min_x as f64 * cell_w,
                total.min.y + b.min_y as f64 * cell_h,
                total.min.x + gw.min(b.max_x + 1) as f64 * cell_w,
                total.min.y + gh.min(b.max_y + 1) as f64 * cell_h,
            )
        })
        .collect();
    result.grid_width = gw;
    result.grid_height = gh;
    debug!(
        "analyze_boxes: grid {}x{}, {} occupied cells, {} components, {} kept, {} frames skipped",
        gw,
        gh,
        grid.count(),
        found,
        result.regions.len(),
        result.skipped_frames
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_keeps_aspect_and_cap() {
        assert_eq!(grid_dimensions(300.0, 100.0, 10), (30, 10));
        assert_eq!(grid_dimensions(100.0, 250.0, 10), (10, 25));
        assert_eq!(grid_dimensions(1e6, 1.0, 10), (MAX_GRID_DIM, 10));
    }

    #[test]
    fn empty_and_invalid_input() {
        let r = analyze_boxes(&[], 10);
        assert!(r.total_extents.is_none());
        assert!(r.regions.is_empty());

        let r = analyze_boxes(
            &[
                WorldExtents::new(0.0, 0.0, 0.0, 5.0),
                WorldExtents::new(f64::INFINITY, 0.0, 1.0, 1.0),
            ],
            10,
        );
        assert_eq!(r.skipped_invalid, 2);
        assert!(r.total_extents.is_none());
    }

    #[test]
    fn separated_groups_become_components() {
        let boxes = [
            // group A, bottom-left
            WorldExtents::new(0.0, 0.0, 10.0, 10.0),
            WorldExtents::new(12.0, 0.0, 20.0, 8.0),
            // group B, top-right
            WorldExtents::new(80.0, 80.0, 100.0, 100.0),
            // page frame around everything
            WorldExtents::new(0.0, 0.0, 100.0, 100.0),
        ];
        let r = analyze_boxes(&boxes, 10);
        assert_eq!(r.skipped_frames, 1);
        assert_eq!(r.total_extents, Some(WorldExtents::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(r.regions.len(), 2);

        let a = r.regions[0];
        assert!(a.min.x <= 0.0 && a.max.x >= 20.0 && a.max.y <= 30.0);
        let b = r.regions[1];
        assert!(b.min.x >= 60.0 && b.max.x == 100.0 && b.max.y == 100.0);
    }

    #[test]
    fn corner_specks_survive_dilation() {
        // a lone speck dilates to 2x2 even in a corner
        let boxes = [
            WorldExtents::new(0.0, 0.0, 1.0, 1.0),
            WorldExtents::new(99.0, 99.0, 100.0, 100.0),
        ];
        let r = analyze_boxes(&boxes, 10);
        assert_eq!(r.regions.len(), 2);
        assert_eq!(r.regions[0], WorldExtents::new(0.0, 0.0, 20.0, 20.0));

        // on a 1x1 grid nothing can grow past a single cell
        let r = analyze_boxes(&boxes, 1);
        assert_eq!((r.grid_width, r.grid_height), (1, 1));
        assert!(r.regions.is_empty());
    }
}
