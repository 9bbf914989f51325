//! Extraction pipeline over an in-memory raster.
//!
//! Typical usage:
//! ```no_run
//! use drawing_compactor::{CompactOutcome, CompactorParams, DenseRegionExtractor};
//! use drawing_compactor::image::io::load_raster;
//!
//! # fn example() -> drawing_compactor::Result<()> {
//! let raster = load_raster("sheet.png".as_ref())?;
//! let extractor = DenseRegionExtractor::new(CompactorParams::default());
//! match extractor.compact(raster) {
//!     CompactOutcome::Composed { image, .. } => println!("{}x{}", image.w, image.h),
//!     CompactOutcome::PassThrough { reason, .. } => println!("unchanged: {reason:?}"),
//! }
//! # Ok(())
//! # }
//! ```

// Stages
// - Level: bounded analysis raster and its scaling to full resolution.
// - Density: background, ink integral, cell grid, adaptive threshold.
// - Regions: components → merge → score filter.
// - Cluster: sparse pre-filter and proximity clusters (optional).
// - Finish: lift to full resolution, ink trimming, reading order.
// - Layout (compact only): crop, plan, compose.

use super::params::CompactorParams;
use crate::background::estimate_background;
use crate::cluster::filter_clusters;
use crate::density::{cell_size_for, AdaptiveThreshold, DensityGrid};
use crate::diagnostics::{
    elapsed_ms, DensityStage, ExtractionReport, InputDescriptor, RegionStage, TimingBreakdown,
};
use crate::image::RasterRgba;
use crate::integral::IntegralImage;
use crate::layout::{compose, plan_layout, reading_order};
use crate::pyramid::build_analysis_level;
use crate::regions::{
    filter_regions, find_regions, merge_gap_px, merge_regions, trim_to_ink, trim_to_ink_scan,
    Region,
};
use log::{debug, info, warn};
use serde::Serialize;
use std::time::Instant;

/// Why the input is returned unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PassThroughReason {
    /// The input could not be decoded as an image.
    Undecodable,
    /// No dense region survived filtering.
    NoRegions,
    /// The kept regions produced an empty canvas.
    EmptyLayout,
}

pub enum CompactOutcome {
    Composed {
        image: RasterRgba,
        report: ExtractionReport,
    },
    /// `image` is the input raster, untouched.
    PassThrough {
        image: RasterRgba,
        reason: PassThroughReason,
        report: ExtractionReport,
    },
}

impl CompactOutcome {
    pub fn image(&self) -> &RasterRgba {
        match self {
            CompactOutcome::Composed { image, .. } | CompactOutcome::PassThrough { image, .. } => {
                image
            }
        }
    }

    pub fn report(&self) -> &ExtractionReport {
        match self {
            CompactOutcome::Composed { report, .. }
            | CompactOutcome::PassThrough { report, .. } => report,
        }
    }

    pub fn into_image(self) -> RasterRgba {
        match self {
            CompactOutcome::Composed { image, .. } | CompactOutcome::PassThrough { image, .. } => {
                image
            }
        }
    }

    pub fn is_composed(&self) -> bool {
        matches!(self, CompactOutcome::Composed { .. })
    }
}

/// Finds the content-dense regions of a raster and composes them into a
/// compact canvas.
#[derive(Clone, Debug, Default)]
pub struct DenseRegionExtractor {
    params: CompactorParams,
}

impl DenseRegionExtractor {
    pub fn new(params: CompactorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CompactorParams {
        &self.params
    }

    /// Run detection and return the kept regions (full-resolution pixels,
    /// reading order) with a trace of every stage. Never fails; a blank or
    /// empty raster yields an empty `kept` list.
    pub fn extract(&self, raster: &RasterRgba) -> ExtractionReport {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();
        let p = &self.params;

        let stage = Instant::now();
        let level = build_analysis_level(raster, p.analysis.max_analysis_dim);
        timings.record_since("level", stage);
        let image: &RasterRgba = level.image.as_ref();
        let input = InputDescriptor {
            width: raster.w,
            height: raster.h,
            analysis_width: image.w,
            analysis_height: image.h,
            analysis_factor: level.scaling.factor,
        };

        let stage = Instant::now();
        let background = estimate_background(image);
        let integral = IntegralImage::build(image, background, p.density.bg_delta);
        let cell_size = cell_size_for(image.w, image.h, p.density.grid_target_cells_across);
        let grid = DensityGrid::build(&integral, cell_size);
        let threshold = AdaptiveThreshold::compute(
            &grid.values,
            p.density.region_percentile,
            p.density.min_cell_fill,
        );
        let dense = grid.dense_mask(threshold.active);
        timings.record_since("density", stage);
        let density = DensityStage {
            background,
            ink_pixels: integral.total() as u64,
            cell_size,
            cells_x: grid.cells_x,
            cells_y: grid.cells_y,
            threshold,
            dense_cells: dense.iter().filter(|&&d| d).count(),
        };
        debug!(
            "DenseRegionExtractor::extract bg=({},{},{}) cell={} threshold={:.4} dense={}",
            background.r, background.g, background.b, cell_size, threshold.active, density.dense_cells
        );

        let stage = Instant::now();
        let min_region_pixels = level.scaling.area_to_level(p.regions.min_region_pixels);
        let found = find_regions(&grid, &dense, p.regions.margin_cells, min_region_pixels);
        let merge_gap = merge_gap_px(cell_size, p.regions.margin_cells);
        let merged = merge_regions(found.clone(), merge_gap);
        let filtered = filter_regions(merged.clone(), &p.regions.filter(), &integral, cell_size);
        timings.record_since("regions", stage);

        let (selected, cluster) = if p.cluster.enabled && !filtered.is_empty() {
            let stage = Instant::now();
            let (kept, report) = filter_clusters(filtered.clone(), image.w, image.h, &p.cluster);
            timings.record_since("cluster", stage);
            (kept, Some(report))
        } else {
            (filtered.clone(), None)
        };

        let stage = Instant::now();
        let factor = level.scaling.factor;
        let mut kept: Vec<Region> = selected
            .iter()
            .filter_map(|r| level.scaling.region_to_full(r))
            .map(|r| match (p.regions.trim_to_ink, factor) {
                (false, _) => r,
                (true, 1) => trim_to_ink(&r, &integral),
                // subsampling skips pixels, trim against the full raster
                (true, _) => trim_to_ink_scan(&r, raster, background, p.density.bg_delta),
            })
            .collect();
        reading_order(&mut kept);
        timings.record_since("finish", stage);

        if kept.is_empty() {
            warn!(
                "no dense regions found in {}x{} raster",
                raster.w, raster.h
            );
        } else {
            info!("found {} dense regions", kept.len());
        }

        timings.total_ms = elapsed_ms(total_start);
        ExtractionReport {
            input,
            timings,
            density: Some(density),
            regions: Some(RegionStage {
                min_region_pixels,
                merge_gap_px: merge_gap,
                found,
                merged,
                filtered,
            }),
            cluster,
            kept,
            layout: None,
        }
    }

    /// Extract and compose. The raster comes back unchanged when there is
    /// nothing to compact.
    pub fn compact(&self, raster: RasterRgba) -> CompactOutcome {
        let report = self.extract(&raster);
        self.compose_regions(raster, report)
    }

    /// Compose the regions kept by an earlier [`extract`](Self::extract)
    /// of the same raster.
    pub fn compose_regions(
        &self,
        raster: RasterRgba,
        mut report: ExtractionReport,
    ) -> CompactOutcome {
        if report.kept.is_empty() {
            return CompactOutcome::PassThrough {
                image: raster,
                reason: PassThroughReason::NoRegions,
                report,
            };
        }

        let stage = Instant::now();
        let parts: Vec<RasterRgba> = report
            .kept
            .iter()
            .filter_map(|r| raster.crop(r.x as usize, r.y as usize, r.w as usize, r.h as usize))
            .collect();
        let sizes: Vec<(usize, usize)> = parts.iter().map(|part| (part.w, part.h)).collect();
        let layout = &self.params.layout;
        let Some(plan) = plan_layout(&sizes, layout.gap, layout.max_canvas_dim) else {
            warn!("layout produced an empty canvas, returning input unchanged");
            return CompactOutcome::PassThrough {
                image: raster,
                reason: PassThroughReason::EmptyLayout,
                report,
            };
        };
        let image = compose(&plan, &parts);
        let ms = report.timings.record_since("layout", stage);
        report.timings.total_ms += ms;
        info!(
            "composed {} regions into {}x{} canvas",
            plan.placements.len(),
            image.w,
            image.h
        );
        report.layout = Some(plan);
        CompactOutcome::Composed { image, report }
    }
}
