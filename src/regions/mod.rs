//! Region finding, merging and filtering over a density grid.
//!
//! - `components`: generic labelling of a boolean grid (dilation pre-pass,
//!   margin post-pass), shared with the occupancy analyser.
//! - `finder`: dense cells → margin-expanded pixel regions with scores.
//! - `merge`: union of overlapping/nearby regions to a fixpoint.
//! - `filter`: relative score cut and region cap.
//! - `trim`: tightening kept regions to their ink.

pub mod components;
pub mod filter;
pub mod finder;
pub mod merge;
pub mod trim;
mod types;

pub use components::{label_components, BoolGrid, CellBounds, Component, LabelOptions};
pub use filter::{fill_ratio, filter_regions, mean_cell_density, sort_by_score, RegionFilter};
pub use finder::find_regions;
pub use merge::{merge_gap_px, merge_regions};
pub use trim::{trim_to_ink, trim_to_ink_scan};
pub use types::{bounding_box, Region};
