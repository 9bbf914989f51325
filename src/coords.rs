//! Mapping between pixel, normalized and logical (world) coordinates.
//!
//! Pixel space has its origin at the top-left with `y` growing downwards;
//! world space is bottom-up, so the `y` axis is flipped when crossing over.
//! Everything here is a pure function of its arguments.
use crate::regions::Region;
use nalgebra::Point2;
use serde::Serialize;

/// Largest absolute coordinate accepted as a real entity extent.
pub const MAX_VALID_COORD: f64 = 1e20;

/// Axis-aligned box in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WorldExtents {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl WorldExtents {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: Point2::new(min_x, min_y),
            max: Point2::new(max_x, max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Finite, bounded and with positive extent on both axes.
    pub fn is_valid(&self) -> bool {
        let bounded = |v: f64| v.is_finite() && v.abs() < MAX_VALID_COORD;
        bounded(self.min.x)
            && bounded(self.min.y)
            && bounded(self.max.x)
            && bounded(self.max.y)
            && self.min.x < self.max.x
            && self.min.y < self.max.y
    }

    pub fn union(&self, other: &WorldExtents) -> WorldExtents {
        WorldExtents::new(
            self.min.x.min(other.min.x),
            self.min.y.min(other.min.y),
            self.max.x.max(other.max.x),
            self.max.y.max(other.max.y),
        )
    }

    /// Union of all boxes, `None` for an empty slice.
    pub fn enclosing(boxes: &[WorldExtents]) -> Option<WorldExtents> {
        let (first, rest) = boxes.split_first()?;
        Some(rest.iter().fold(*first, |acc, b| acc.union(b)))
    }
}

/// Rectangle in `[0, 1]²` relative to a pixel frame (top-left origin).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// A pixel region together with the world box it covers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedRegion {
    pub pixel: Region,
    pub normalized: NormalizedRect,
    pub world: WorldExtents,
}

/// Pixel frame of `pixel_width × pixel_height` laid over `extents`.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateMapper {
    pub extents: WorldExtents,
    pub pixel_width: usize,
    pub pixel_height: usize,
}

impl CoordinateMapper {
    pub fn new(extents: WorldExtents, pixel_width: usize, pixel_height: usize) -> Self {
        Self {
            extents,
            pixel_width: pixel_width.max(1),
            pixel_height: pixel_height.max(1),
        }
    }

    pub fn pixel_to_normalized(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::new(p.x / self.pixel_width as f64, p.y / self.pixel_height as f64)
    }

    /// `x = minX + nx·W`, `y = maxY − ny·H`.
    pub fn normalized_to_logical(&self, n: Point2<f64>) -> Point2<f64> {
        let e = &self.extents;
        Point2::new(e.min.x + n.x * e.width(), e.max.y - n.y * e.height())
    }

    /// Inverse of [`Self::normalized_to_logical`]; degenerate extents map to 0.
    pub fn logical_to_normalized(&self, p: Point2<f64>) -> Point2<f64> {
        let e = &self.extents;
        let nx = if e.width() > 0.0 {
            (p.x - e.min.x) / e.width()
        } else {
            0.0
        };
        let ny = if e.height() > 0.0 {
            (e.max.y - p.y) / e.height()
        } else {
            0.0
        };
        Point2::new(nx, ny)
    }

    pub fn normalize_region(&self, region: &Region) -> NormalizedRect {
        let (pw, ph) = (self.pixel_width as f64, self.pixel_height as f64);
        NormalizedRect {
            x: region.x as f64 / pw,
            y: region.y as f64 / ph,
            w: region.w as f64 / pw,
            h: region.h as f64 / ph,
        }
    }

    /// World box covered by a pixel region. The region's top edge becomes the
    /// world box's `max.y`.
    pub fn region_to_world(&self, region: &Region) -> MappedRegion {
        let n = self.normalize_region(region);
        let e = &self.extents;
        let min_x = e.min.x + n.x * e.width();
        let max_x = min_x + n.w * e.width();
        let max_y = e.max.y - n.y * e.height();
        let min_y = max_y - n.h * e.height();
        MappedRegion {
            pixel: *region,
            normalized: n,
            world: WorldExtents::new(min_x, min_y, max_x, max_y),
        }
    }
}

/// Bounding box of the kept content, or `full` when that box is degenerate.
pub fn content_extents(mapped: &[MappedRegion], full: &WorldExtents) -> WorldExtents {
    let worlds: Vec<WorldExtents> = mapped.iter().map(|m| m.world).collect();
    match WorldExtents::enclosing(&worlds) {
        Some(e) if e.width() > 0.0 && e.height() > 0.0 => e,
        _ => *full,
    }
}

/// Uniform world→pixel scale fitting `content` into `target_w × target_h`.
pub fn fit_scale(target_w: usize, target_h: usize, content: &WorldExtents) -> f64 {
    let sx = target_w as f64 / content.width();
    let sy = target_h as f64 / content.height();
    sx.min(sy)
}

/// Pixel size of a world box at `scale`: `ceil(size · scale)`, at least 1.
pub fn part_size(world: &WorldExtents, scale: f64) -> (usize, usize) {
    let px = |v: f64| {
        let c = (v * scale).ceil();
        if c.is_finite() && c >= 1.0 {
            c as usize
        } else {
            1
        }
    };
    (px(world.width()), px(world.height()))
}

/// Clamp a render size to `max` on both axes, keeping the aspect ratio.
pub fn normalize_render_size(width: usize, height: usize, max: usize) -> (usize, usize) {
    let w = width.max(1);
    let h = height.max(1);
    if w <= max && h <= max {
        return (w, h);
    }
    let scale = (max as f64 / w as f64).min(max as f64 / h as f64);
    let nw = ((w as f64 * scale).floor() as usize).max(1);
    let nh = ((h as f64 * scale).floor() as usize).max(1);
    (nw, nh)
}

/// Proxy raster size for the content box: the longer world axis gets
/// `max_dim` pixels.
pub fn proxy_dimensions(content: &WorldExtents, max_dim: usize) -> (usize, usize) {
    let (w, h) = (content.width(), content.height());
    let short = |ratio: f64| ((max_dim as f64 * ratio).round() as usize).max(1);
    if w >= h {
        (max_dim, short(h / w))
    } else {
        (short(w / h), max_dim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(WorldExtents::new(-500.0, 100.0, 1500.0, 1100.0), 2000, 1000)
    }

    #[test]
    fn normalized_logical_round_trip() {
        let m = mapper();
        for &(nx, ny) in &[(0.1, 0.2), (0.5, 0.5), (0.93, 0.07), (0.333, 0.871)] {
            let n = Point2::new(nx, ny);
            let back = m.logical_to_normalized(m.normalized_to_logical(n));
            assert!((back - n).norm() < 1e-12, "{n:?} -> {back:?}");
        }
    }

    #[test]
    fn y_axis_is_flipped() {
        let m = mapper();
        let top_left = m.normalized_to_logical(m.pixel_to_normalized(Point2::new(0.0, 0.0)));
        assert_eq!(top_left, Point2::new(-500.0, 1100.0));
        let bottom_right =
            m.normalized_to_logical(m.pixel_to_normalized(Point2::new(2000.0, 1000.0)));
        assert_eq!(bottom_right, Point2::new(1500.0, 100.0));
    }

    #[test]
    fn region_maps_top_edge_to_max_y() {
        let m = mapper();
        let mapped = m.region_to_world(&Region::new(500, 250, 1000, 500, 1.0));
        let w = mapped.world;
        assert!((w.min.x - 0.0).abs() < 1e-9);
        assert!((w.max.x - 1000.0).abs() < 1e-9);
        assert!((w.max.y - 850.0).abs() < 1e-9);
        assert!((w.min.y - 350.0).abs() < 1e-9);
        assert!((mapped.normalized.w - 0.5).abs() < 1e-12);
    }

    #[test]
    fn content_extents_fall_back_when_degenerate() {
        let full = WorldExtents::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(content_extents(&[], &full), full);
        let m = CoordinateMapper::new(full, 10, 10);
        let mapped = [
            m.region_to_world(&Region::new(1, 1, 2, 2, 1.0)),
            m.region_to_world(&Region::new(6, 5, 2, 3, 1.0)),
        ];
        let c = content_extents(&mapped, &full);
        let expected = WorldExtents::new(1.0, 2.0, 8.0, 9.0);
        assert!((c.min - expected.min).norm() < 1e-9, "{c:?}");
        assert!((c.max - expected.max).norm() < 1e-9, "{c:?}");
    }

    #[test]
    fn scale_uses_content_not_domain() {
        let content = WorldExtents::new(0.0, 0.0, 200.0, 100.0);
        let s = fit_scale(50_000, 50_000, &content);
        assert_eq!(s, 250.0);
        assert_eq!(part_size(&WorldExtents::new(0.0, 0.0, 10.5, 0.001), s), (2625, 1));
    }

    #[test]
    fn render_sizes_are_bounded() {
        assert_eq!(normalize_render_size(0, 0, 100), (1, 1));
        assert_eq!(normalize_render_size(80, 60, 100), (80, 60));
        assert_eq!(normalize_render_size(50_000, 50_000, 20_000), (20_000, 20_000));
        assert_eq!(normalize_render_size(65_536, 16_384, 8192), (8192, 2048));
        assert_eq!(normalize_render_size(3, 128_000, 1000), (1, 1000));
    }

    #[test]
    fn proxy_follows_content_aspect() {
        let wide = WorldExtents::new(0.0, 0.0, 400.0, 100.0);
        assert_eq!(proxy_dimensions(&wide, 8192), (8192, 2048));
        let tall = WorldExtents::new(0.0, 0.0, 1.0, 1e9);
        assert_eq!(proxy_dimensions(&tall, 8192), (1, 8192));
    }

    #[test]
    fn validity_rejects_degenerate_and_huge_boxes() {
        assert!(WorldExtents::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!WorldExtents::new(0.0, 0.0, 0.0, 1.0).is_valid());
        assert!(!WorldExtents::new(0.0, 0.0, 1e20, 1.0).is_valid());
        assert!(!WorldExtents::new(f64::NAN, 0.0, 1.0, 1.0).is_valid());
    }
}
