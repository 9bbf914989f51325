//! Vertical stacking of extracted parts into one canvas.
//!
//! Parts are stacked top to bottom in the order given, separated by `gap`
//! and centred horizontally. The canvas is transparent. When either canvas
//! side would exceed the safety cap the whole layout (parts and gap) is
//! scaled down uniformly.
use crate::image::RasterRgba;
use crate::regions::Region;
use log::{debug, warn};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Index of the part in the input order.
    pub index: usize,
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPlan {
    pub width: usize,
    pub height: usize,
    /// Uniform factor applied by the safety cap (1.0 when unscaled).
    pub scale: f64,
    pub gap: usize,
    pub placements: Vec<Placement>,
}

impl LayoutPlan {
    pub fn is_scaled(&self) -> bool {
        self.scale < 1.0
    }
}

/// Sort regions top to bottom, then left to right.
pub fn reading_order(regions: &mut [Region]) {
    regions.sort_by_key(|r| (r.y, r.x));
}

/// Plan the canvas for parts of the given `(w, h)` sizes.
///
/// Returns `None` when there is nothing to place or the canvas would be
/// empty.
pub fn plan_layout(
    sizes: &[(usize, usize)],
    gap: usize,
    max_canvas_dim: usize,
) -> Option<LayoutPlan> {
    if sizes.is_empty() {
        return None;
    }
    let width = sizes.iter().map(|&(w, _)| w).max().unwrap_or(0);
    let height = sizes.iter().map(|&(_, h)| h + gap).sum::<usize>() - gap;
    if width == 0 || height == 0 {
        return None;
    }

    let cap = max_canvas_dim.max(1);
    let (scale, width, height, gap) = if width > cap || height > cap {
        let s = (cap as f64 / width as f64).min(cap as f64 / height as f64);
        let scaled = |v: usize| (v as f64 * s) as usize;
        warn!(
            "layout: canvas {}x{} exceeds {} px, scaling by {:.4}",
            width, height, cap, s
        );
        (s, scaled(width).max(1), scaled(height).max(1), scaled(gap))
    } else {
        (1.0, width, height, gap)
    };

    let mut placements = Vec::with_capacity(sizes.len());
    let mut y = 0usize;
    for (index, &(w, h)) in sizes.iter().enumerate() {
        let (w, h) = if scale < 1.0 {
            (
                ((w as f64 * scale) as usize).max(1),
                ((h as f64 * scale) as usize).max(1),
            )
        } else {
            (w, h)
        };
        let x = width.saturating_sub(w) / 2;
        placements.push(Placement { index, x, y, w, h });
        y += h + gap;
    }
    debug!(
        "layout: {} parts on {}x{} canvas (scale {:.4})",
        placements.len(),
        width,
        height,
        scale
    );
    Some(LayoutPlan {
        width,
        height,
        scale,
        gap,
        placements,
    })
}

/// Draw `parts` onto a transparent canvas according to `plan`.
///
/// Parts whose size differs from their placement are resampled bilinearly.
pub fn compose(plan: &LayoutPlan, parts: &[RasterRgba]) -> RasterRgba {
    let mut canvas = RasterRgba::new(plan.width, plan.height);
    for p in &plan.placements {
        let Some(part) = parts.get(p.index) else {
            continue;
        };
        if part.w == p.w && part.h == p.h {
            canvas.blit(part, p.x, p.y);
        } else {
            canvas.blit(&part.resized(p.w, p.h), p.x, p.y);
        }
    }
    canvas
}
