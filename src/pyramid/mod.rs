//! Bounded analysis level built by power-of-two point subsampling.
//!
//! Large drawings are analysed on a reduced copy. The factor `s` is the
//! smallest power of two with `w / s ≤ max_dim` and `h / s ≤ max_dim`
//! (integer division). The reduced raster is `ceil(w / s) × ceil(h / s)`, so
//! a side may exceed `max_dim` by one sample. It holds source pixel
//! `(x·s, y·s)`, and a coordinate at analysis scale maps back to full
//! resolution by a plain multiplication.

pub mod scaling;

use crate::image::{ImageView, ImageViewMut, RasterRgba};
use log::debug;
use std::borrow::Cow;

pub use scaling::LevelScaling;

/// Working raster used by the detection stages.
#[derive(Clone, Debug)]
pub struct AnalysisLevel<'a> {
    pub image: Cow<'a, RasterRgba>,
    pub scaling: LevelScaling,
}

/// Smallest power-of-two factor with both `side / factor` within `max_dim`.
pub fn subsample_factor(width: usize, height: usize, max_dim: usize) -> usize {
    let max_dim = max_dim.max(1);
    let mut scale = 1usize;
    while width / scale > max_dim || height / scale > max_dim {
        scale *= 2;
    }
    scale
}

/// Build the analysis level for `full`, borrowing it when no reduction is needed.
pub fn build_analysis_level(full: &RasterRgba, max_dim: usize) -> AnalysisLevel<'_> {
    let factor = subsample_factor(full.w, full.h, max_dim);
    if factor == 1 {
        return AnalysisLevel {
            image: Cow::Borrowed(full),
            scaling: LevelScaling::identity(full.w, full.h),
        };
    }
    let down = subsample(full, factor);
    debug!(
        "analysis level {}x{} -> {}x{} (factor {})",
        full.w, full.h, down.w, down.h, factor
    );
    let scaling = LevelScaling::new(factor, full.w, full.h);
    AnalysisLevel {
        image: Cow::Owned(down),
        scaling,
    }
}

fn subsample(src: &RasterRgba, factor: usize) -> RasterRgba {
    let (nw, nh) = (src.w.div_ceil(factor), src.h.div_ceil(factor));
    let mut down = RasterRgba::new(nw, nh);
    for y in 0..nh {
        let src_row = src.row(y * factor);
        let dst_row = down.row_mut(y);
        for (x, dst_px) in dst_row.iter_mut().enumerate() {
            *dst_px = src_row[x * factor];
        }
    }
    down
}
