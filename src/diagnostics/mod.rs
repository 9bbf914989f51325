//! Diagnostics data model exposed by the extractor and the CLI tools.
//!
//! [`ExtractionReport`] is the entry point: it bundles the input description,
//! per-stage records and timings, and the final regions and layout.

pub mod report;
pub mod stages;
pub mod timing;

pub use report::ExtractionReport;
pub use stages::{DensityStage, InputDescriptor, RegionStage};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
