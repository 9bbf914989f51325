//! Compaction of a vector drawing through an external renderer.
//!
//! 1. Occupancy analysis of the entity boxes yields the content extents.
//! 2. A proxy raster of those extents is rendered with its longer side at
//!    `proxy_max_dim` and run through the [`DenseRegionExtractor`].
//! 3. Kept proxy regions are mapped back to world space, one scale is
//!    derived from the bounding box of the kept content, and each region is
//!    rendered again at that scale.
//! 4. The high-resolution parts are stacked into one canvas.
//!
//! Whenever there is nothing to compact the whole drawing is rendered
//! instead, so a caller always gets a picture unless rendering itself fails.
use crate::coords::{
    content_extents, fit_scale, normalize_render_size, part_size, proxy_dimensions,
    CoordinateMapper, MappedRegion, WorldExtents,
};
use crate::diagnostics::ExtractionReport;
use crate::extractor::{CompactorParams, DenseRegionExtractor};
use crate::image::RasterRgba;
use crate::layout::{compose, plan_layout, LayoutPlan};
use crate::occupancy::{analyze_boxes, OccupancyResult};
use crate::scene::Scene;
use log::{debug, info, warn};

/// Why a drawing was rendered whole instead of compacted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullRenderReason {
    NoContentExtents,
    ProxyRenderFailed,
    NoRegions,
}

pub enum DrawingOutcome {
    Composed {
        image: RasterRgba,
        regions: Vec<MappedRegion>,
        layout: LayoutPlan,
        report: ExtractionReport,
    },
    FullRender {
        image: RasterRgba,
        reason: FullRenderReason,
    },
    /// Nothing could be rendered.
    Failed,
}

impl DrawingOutcome {
    pub fn image(&self) -> Option<&RasterRgba> {
        match self {
            DrawingOutcome::Composed { image, .. } | DrawingOutcome::FullRender { image, .. } => {
                Some(image)
            }
            DrawingOutcome::Failed => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DrawingCompactor {
    params: CompactorParams,
}

impl DrawingCompactor {
    pub fn new(params: CompactorParams) -> Self {
        Self { params }
    }

    /// Occupancy analysis of the scene's entity boxes.
    pub fn analyze<S: Scene + ?Sized>(&self, scene: &S) -> OccupancyResult {
        analyze_boxes(
            &scene.entity_extents(),
            self.params.drawing.spatial_grid_resolution,
        )
    }

    pub fn process<S: Scene + ?Sized>(&self, scene: &S) -> DrawingOutcome {
        let opts = &self.params.drawing;
        let occupancy = self.analyze(scene);
        let Some(extents) = occupancy.total_extents else {
            warn!("drawing has no valid entity extents, rendering full view");
            return self.full_render(scene, FullRenderReason::NoContentExtents);
        };
        info!(
            "content extents {:.3}x{:.3}, {} occupied areas",
            extents.width(),
            extents.height(),
            occupancy.regions.len()
        );

        let (proxy_w, proxy_h) = proxy_dimensions(&extents, opts.proxy_max_dim);
        debug!("DrawingCompactor::process proxy {}x{}", proxy_w, proxy_h);
        let Some(proxy) = scene.render(Some(&extents), proxy_w, proxy_h) else {
            warn!("proxy render failed, rendering full view");
            return self.full_render(scene, FullRenderReason::ProxyRenderFailed);
        };

        let report = DenseRegionExtractor::new(self.params.clone()).extract(&proxy);
        if report.kept.is_empty() {
            info!("no dense regions in proxy, rendering full view");
            return self.full_render(scene, FullRenderReason::NoRegions);
        }

        let mapper = CoordinateMapper::new(extents, proxy.w, proxy.h);
        let mapped: Vec<MappedRegion> = report
            .kept
            .iter()
            .map(|r| mapper.region_to_world(r))
            .collect();
        let content = content_extents(&mapped, &extents);
        let scale = fit_scale(opts.width, opts.height, &content);
        info!(
            "kept content {:.3}x{:.3}, scale {:.4}",
            content.width(),
            content.height(),
            scale
        );

        let limit = opts.render_limit();
        let mut parts = Vec::with_capacity(mapped.len());
        let mut rendered = Vec::with_capacity(mapped.len());
        for (i, m) in mapped.iter().enumerate() {
            let (w, h) = part_size(&m.world, scale);
            let (w, h) = normalize_render_size(w, h, limit);
            debug!("rendering region {} at {}x{}", i + 1, w, h);
            match scene.render(Some(&m.world), w, h) {
                Some(part) => {
                    parts.push(part);
                    rendered.push(*m);
                }
                None => warn!("render of region {} failed, skipping", i + 1),
            }
        }

        let sizes: Vec<(usize, usize)> = parts.iter().map(|p| (p.w, p.h)).collect();
        let layout_opts = &self.params.layout;
        let Some(layout) = plan_layout(&sizes, layout_opts.gap, layout_opts.max_canvas_dim) else {
            warn!("no region could be rendered");
            return DrawingOutcome::Failed;
        };
        let image = compose(&layout, &parts);
        info!(
            "composed {} parts into {}x{}{}",
            parts.len(),
            image.w,
            image.h,
            if layout.is_scaled() { " (scaled to cap)" } else { "" }
        );
        DrawingOutcome::Composed {
            image,
            regions: rendered,
            layout,
            report,
        }
    }

    fn full_render<S: Scene + ?Sized>(&self, scene: &S, reason: FullRenderReason) -> DrawingOutcome {
        let opts = &self.params.drawing;
        let (w, h) = normalize_render_size(opts.width, opts.height, opts.render_limit());
        match scene.render(None, w, h) {
            Some(image) => DrawingOutcome::FullRender { image, reason },
            None => {
                warn!("full render at {}x{} failed", w, h);
                DrawingOutcome::Failed
            }
        }
    }
}

/// Full world extents a viewport of `None` stands for, when known.
pub fn full_extents<S: Scene + ?Sized>(scene: &S) -> Option<WorldExtents> {
    let valid: Vec<WorldExtents> = scene
        .entity_extents()
        .into_iter()
        .filter(WorldExtents::is_valid)
        .collect();
    WorldExtents::enclosing(&valid)
}
