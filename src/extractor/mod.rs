//! Dense-region extraction and raster compaction.
//!
//! Overview
//! - Reduces the input to a bounded analysis level (power-of-two point
//!   subsampling) so working memory stays bounded for very large sheets.
//! - Estimates the paper colour from the corners, classifies ink and builds
//!   a summed-area table of it.
//! - Partitions the level into cells, thresholds cell densities at a
//!   percentile of their own distribution, and labels connected dense cells
//!   into margin-expanded regions.
//! - Merges nearby regions to a fixpoint, drops weak ones relative to the
//!   best, and optionally rejects large sparse frames and far-away clusters.
//! - Tightens the survivors to their ink, lifts them to full resolution and
//!   stacks them into one compact canvas.
//!
//! Modules
//! - [`params`]: stage options and their flat JSON surface.
//! - `pipeline`: the [`DenseRegionExtractor`].
//! - `files`: file and directory front-ends with the pass-through contract.

mod files;
pub mod params;
mod pipeline;

pub use files::{compact_directory, compact_png_file, BatchSummary, FileOutcome};
pub use params::{
    AnalysisOptions, ClusterOptions, CompactorParams, DensityOptions, DrawingOptions,
    LayoutOptions, RegionOptions,
};
pub use pipeline::{CompactOutcome, DenseRegionExtractor, PassThroughReason};
