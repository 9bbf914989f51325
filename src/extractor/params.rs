//! Parameter types configuring the compaction stages.
//!
//! Every stage receives its options explicitly. All structs deserialize from
//! a single flat JSON object (the stage structs are flattened into
//! [`CompactorParams`]), and every key is optional.
//!
//! Defaults are tuned for scanned or rendered A0-class drawings. When a
//! drawing loses content, lower `region_percentile` or `min_region_pixels`
//! first; when it keeps noise, raise `score_threshold_ratio`.
use crate::regions::RegionFilter;
use serde::{Deserialize, Serialize};

/// Parameters for the whole raster/scene pipeline.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CompactorParams {
    #[serde(flatten)]
    pub density: DensityOptions,
    #[serde(flatten)]
    pub regions: RegionOptions,
    #[serde(flatten)]
    pub cluster: ClusterOptions,
    #[serde(flatten)]
    pub layout: LayoutOptions,
    #[serde(flatten)]
    pub analysis: AnalysisOptions,
    #[serde(flatten)]
    pub drawing: DrawingOptions,
}

/// Ink classification and cell density thresholding.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct DensityOptions {
    /// Percentile of cell densities used as the adaptive cutoff, in `[0, 1]`.
    pub region_percentile: f64,
    /// Lower bound on the adaptive cutoff.
    pub min_cell_fill: f64,
    /// L1 RGB distance a pixel must exceed to count as ink.
    pub bg_delta: u32,
    pub grid_target_cells_across: usize,
}

impl Default for DensityOptions {
    fn default() -> Self {
        Self {
            region_percentile: 0.90,
            min_cell_fill: 0.0025,
            bg_delta: 25,
            grid_target_cells_across: 128,
        }
    }
}

/// Region finding, merging and filtering.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct RegionOptions {
    /// Minimum post-margin area in full-resolution pixels.
    pub min_region_pixels: usize,
    pub margin_cells: usize,
    pub max_regions: usize,
    /// Regions scoring below `best × ratio` are dropped.
    pub score_threshold_ratio: f64,
    /// Shrink kept regions to the ink they contain.
    pub trim_to_ink: bool,
    /// Regions whose mean cell density is lower are dropped.
    pub min_region_density: f64,
    /// Regions with a lower share of ink pixels are dropped.
    pub min_region_fill_ratio: f64,
}

impl Default for RegionOptions {
    fn default() -> Self {
        Self {
            min_region_pixels: 40_000,
            margin_cells: 2,
            max_regions: 12,
            score_threshold_ratio: 0.23,
            trim_to_ink: true,
            min_region_density: 0.0,
            min_region_fill_ratio: 0.0,
        }
    }
}

impl RegionOptions {
    pub fn filter(&self) -> RegionFilter {
        RegionFilter {
            score_threshold_ratio: self.score_threshold_ratio,
            max_regions: self.max_regions,
            min_density: self.min_region_density,
            min_fill_ratio: self.min_region_fill_ratio,
        }
    }
}

/// Sparse-region pre-filter and proximity clustering.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusterOptions {
    #[serde(rename = "cluster_filter")]
    pub enabled: bool,
    /// Clusters closer than `max(domain_w, domain_h) × fraction` are joined.
    pub merge_distance_fraction: f64,
    pub keep_score_ratio: f64,
    pub keep_area_ratio: f64,
    /// A region larger than `factor × median area` ...
    pub sparse_area_factor: f64,
    /// ... and less dense than `factor × max density` is a frame.
    pub sparse_density_factor: f64,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            merge_distance_fraction: 0.2,
            keep_score_ratio: 0.1,
            keep_area_ratio: 0.02,
            sparse_area_factor: 3.0,
            sparse_density_factor: 0.6,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Vertical gap between stacked parts, in output pixels.
    pub gap: usize,
    /// The composed canvas is rescaled to fit this on both axes.
    pub max_canvas_dim: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            gap: 50,
            max_canvas_dim: 20_000,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Rasters larger than this on either axis are subsampled for analysis.
    pub max_analysis_dim: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_analysis_dim: 4096,
        }
    }
}

/// Render sizes of the scene pipeline.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct DrawingOptions {
    /// Target output size the content box is fitted into.
    pub width: usize,
    pub height: usize,
    pub max_resolution_limit: usize,
    pub proxy_max_dim: usize,
    /// Occupancy grid cells along the shorter domain axis.
    pub spatial_grid_resolution: usize,
    pub max_part_dim: usize,
}

impl Default for DrawingOptions {
    fn default() -> Self {
        Self {
            width: 50_000,
            height: 50_000,
            max_resolution_limit: 90_000,
            proxy_max_dim: 8192,
            spatial_grid_resolution: 10,
            max_part_dim: 20_000,
        }
    }
}

impl DrawingOptions {
    /// Largest edge any single render may have.
    pub fn render_limit(&self) -> usize {
        self.max_resolution_limit.min(self.max_part_dim)
    }
}
