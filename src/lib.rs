//! Dense-region detection and compaction for large technical drawings.
//!
//! Large-format drawings are mostly empty paper. This crate finds where the
//! content actually is and stacks those parts into one compact raster:
//!
//! - [`DenseRegionExtractor`] works on a raster: ink density on a cell grid,
//!   adaptive thresholding, connected components, merging, score and
//!   cluster filtering, then a vertical layout of the kept crops.
//! - [`DrawingCompactor`] works on a vector drawing behind the [`Scene`]
//!   trait: it analyses entity boxes, renders a proxy, runs the extractor on
//!   it and re-renders every kept region at high resolution.
//!
//! The detection core never fails. Degenerate inputs fall back to returning
//! the input unchanged (or a full render for drawings).

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod drawing;
pub mod error;
pub mod extractor;
pub mod image;
pub mod scene;

// Stage modules, public for tools and tests.
pub mod background;
pub mod cluster;
pub mod coords;
pub mod density;
pub mod integral;
pub mod layout;
pub mod occupancy;
pub mod pyramid;
pub mod regions;

// --- High-level re-exports -------------------------------------------------

pub use crate::drawing::{DrawingCompactor, DrawingOutcome, FullRenderReason};
pub use crate::error::{CompactError, Result};
pub use crate::extractor::{
    compact_directory, compact_png_file, CompactOutcome, CompactorParams, DenseRegionExtractor,
    PassThroughReason,
};
pub use crate::scene::Scene;

pub use crate::coords::WorldExtents;
pub use crate::diagnostics::ExtractionReport;
pub use crate::regions::Region;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use drawing_compactor::prelude::*;
///
/// # fn main() {
/// let mut raster = RasterRgba::from_pixel(2000, 2000, [255, 255, 255, 255]);
/// raster.fill_rect(200, 200, 300, 300, [0, 0, 0, 255]);
///
/// let extractor = DenseRegionExtractor::new(CompactorParams::default());
/// let report = extractor.extract(&raster);
/// println!("kept={} total_ms={:.3}", report.kept.len(), report.timings.total_ms);
/// # }
/// ```
pub mod prelude {
    pub use crate::image::RasterRgba;
    pub use crate::{
        CompactOutcome, CompactorParams, DenseRegionExtractor, DrawingCompactor, DrawingOutcome,
        Region, Scene, WorldExtents,
    };
}
