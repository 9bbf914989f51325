//! Scaling between the analysis level and the full-resolution raster.
use crate::regions::Region;

/// Integer subsampling factor between the analysis level and full resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelScaling {
    pub factor: usize,
    pub full_width: usize,
    pub full_height: usize,
}

impl LevelScaling {
    pub fn new(factor: usize, full_width: usize, full_height: usize) -> Self {
        Self {
            factor: factor.max(1),
            full_width,
            full_height,
        }
    }

    pub fn identity(full_width: usize, full_height: usize) -> Self {
        Self::new(1, full_width, full_height)
    }

    /// Scale an area threshold expressed in full-resolution pixels down to
    /// the analysis level (`/ factor²`, at least 1).
    pub fn area_to_level(&self, full_area: usize) -> usize {
        (full_area / (self.factor * self.factor)).max(1)
    }

    /// Lift a region from the analysis level to full resolution, clipped to
    /// the full image. Returns `None` if nothing remains after clipping.
    pub fn region_to_full(&self, region: &Region) -> Option<Region> {
        let s = self.factor as i64;
        let x0 = (region.x * s).clamp(0, self.full_width as i64);
        let y0 = (region.y * s).clamp(0, self.full_height as i64);
        let x1 = ((region.x + region.w) * s).clamp(0, self.full_width as i64);
        let y1 = ((region.y + region.h) * s).clamp(0, self.full_height as i64);
        Region::from_corners(x0, y0, x1, y1, region.score)
    }
}
