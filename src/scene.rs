//! Interface to an external drawing decoder/renderer.
//!
//! The compactor never parses drawing formats itself. A [`Scene`] is a
//! decoded drawing that can list its entity boxes and render any part of
//! itself at a requested pixel size.
use crate::coords::WorldExtents;
use crate::image::RasterRgba;

pub trait Scene {
    /// World-space bounding boxes of the visible, non-viewport entities.
    /// Invalid boxes may be included; callers filter them.
    fn entity_extents(&self) -> Vec<WorldExtents>;

    /// Render `viewport` (or the full drawing extents when `None`) into a
    /// `width × height` raster. `None` when rendering fails.
    fn render(
        &self,
        viewport: Option<&WorldExtents>,
        width: usize,
        height: usize,
    ) -> Option<RasterRgba>;
}
