//! Per-stage records of an extraction run.
use crate::background::BackgroundColor;
use crate::density::AdaptiveThreshold;
use crate::regions::Region;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub analysis_width: usize,
    pub analysis_height: usize,
    /// Power-of-two subsampling factor of the analysis level.
    pub analysis_factor: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityStage {
    pub background: BackgroundColor,
    pub ink_pixels: u64,
    pub cell_size: usize,
    pub cells_x: usize,
    pub cells_y: usize,
    pub threshold: AdaptiveThreshold,
    pub dense_cells: usize,
}

/// Region lists as they leave each stage, in analysis-level pixels.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStage {
    /// Area threshold after scaling to the analysis level.
    pub min_region_pixels: usize,
    pub merge_gap_px: i64,
    pub found: Vec<Region>,
    pub merged: Vec<Region>,
    pub filtered: Vec<Region>,
}
