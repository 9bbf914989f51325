use serde::Serialize;

/// Axis-aligned box with an accumulated density score.
///
/// The coordinate space (analysis level, full resolution, proxy render) is
/// tracked by the caller. Regions are values: merging produces a new region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Region {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
    pub score: f64,
}

impl Region {
    /// Build a region; `w` and `h` are clamped to at least one pixel.
    pub fn new(x: i64, y: i64, w: i64, h: i64, score: f64) -> Self {
        Self {
            x,
            y,
            w: w.max(1),
            h: h.max(1),
            score,
        }
    }

    /// Region spanning `[x0, x1) × [y0, y1)`; `None` when empty.
    pub fn from_corners(x0: i64, y0: i64, x1: i64, y1: i64, score: f64) -> Option<Self> {
        (x1 > x0 && y1 > y0).then(|| Self::new(x0, y0, x1 - x0, y1 - y0, score))
    }

    #[inline]
    pub fn right(&self) -> i64 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y + self.h
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.w * self.h
    }

    /// Score per pixel of bounding-box area.
    pub fn density(&self) -> f64 {
        self.score / self.area() as f64
    }

    /// Bounding-box union; scores add up.
    pub fn union(&self, other: &Region) -> Region {
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Region::new(x0, y0, x1 - x0, y1 - y0, self.score + other.score)
    }

    /// True when `self`, grown by `gap` on every side, strictly overlaps `other`.
    pub fn overlaps_or_near(&self, other: &Region, gap: i64) -> bool {
        self.x - gap < other.right()
            && self.right() + gap > other.x
            && self.y - gap < other.bottom()
            && self.bottom() + gap > other.y
    }

    /// Euclidean length of the empty space between two boxes (zero when they
    /// touch or overlap).
    pub fn gap_to(&self, other: &Region) -> f64 {
        let span_x = self.right().max(other.right()) - self.x.min(other.x);
        let span_y = self.bottom().max(other.bottom()) - self.y.min(other.y);
        let dx = (span_x - self.w - other.w).max(0) as f64;
        let dy = (span_y - self.h - other.h).max(0) as f64;
        dx.hypot(dy)
    }
}

/// Bounding box of a set of regions, as `(x0, y0, x1, y1)`.
pub fn bounding_box(regions: &[Region]) -> Option<(i64, i64, i64, i64)> {
    regions.iter().fold(None, |acc, r| {
        Some(match acc {
            None => (r.x, r.y, r.right(), r.bottom()),
            Some((x0, y0, x1, y1)) => (
                x0.min(r.x),
                y0.min(r.y),
                x1.max(r.right()),
                y1.max(r.bottom()),
            ),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_sums_scores_and_spans_both() {
        let a = Region::new(0, 0, 10, 10, 1.0);
        let b = Region::new(20, 5, 5, 20, 2.5);
        let u = a.union(&b);
        assert_eq!((u.x, u.y, u.w, u.h), (0, 0, 25, 25));
        assert_eq!(u.score, 3.5);
    }

    #[test]
    fn proximity_test_is_rectangular_and_strict() {
        let a = Region::new(0, 0, 10, 10, 1.0);
        let b = Region::new(15, 0, 10, 10, 1.0);
        assert!(!a.overlaps_or_near(&b, 5));
        assert!(a.overlaps_or_near(&b, 6));
        // diagonal neighbour within the gap on both axes
        let c = Region::new(13, 13, 4, 4, 1.0);
        assert!(a.overlaps_or_near(&c, 4));
        assert!(!a.overlaps_or_near(&c, 3));
    }

    #[test]
    fn gap_is_euclidean_between_edges() {
        let a = Region::new(0, 0, 10, 10, 1.0);
        let b = Region::new(13, 14, 5, 5, 1.0);
        assert!((a.gap_to(&b) - 5.0).abs() < 1e-12);
        assert_eq!(a.gap_to(&Region::new(5, 5, 20, 20, 0.0)), 0.0);
    }

    #[test]
    fn degenerate_corners_yield_none() {
        assert!(Region::from_corners(5, 5, 5, 9, 0.0).is_none());
        assert_eq!(Region::new(0, 0, 0, -3, 0.0).area(), 1);
    }
}
