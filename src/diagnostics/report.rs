use super::{DensityStage, InputDescriptor, RegionStage, TimingBreakdown};
use crate::cluster::ClusterReport;
use crate::layout::LayoutPlan;
use crate::regions::Region;
use serde::Serialize;

/// Result of [`DenseRegionExtractor::extract`](crate::DenseRegionExtractor).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<DensityStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<RegionStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ClusterReport>,
    /// Final regions in full-resolution pixels, in layout order.
    pub kept: Vec<Region>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutPlan>,
}

impl ExtractionReport {
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }

    /// Human-readable summary for the command-line tools.
    pub fn print_text_summary(&self) {
        let input = &self.input;
        println!("Extraction summary");
        println!(
            "  input: {}x{} (analysis {}x{}, factor {})",
            input.width, input.height, input.analysis_width, input.analysis_height, input.analysis_factor
        );
        if let Some(d) = &self.density {
            let bg = d.background;
            println!("  background: ({}, {}, {})  ink px: {}", bg.r, bg.g, bg.b, d.ink_pixels);
            println!(
                "  grid: {}x{} cells of {} px, threshold {:.4} (p{:.0}={:.4}, floor {:.4}), dense {}",
                d.cells_x,
                d.cells_y,
                d.cell_size,
                d.threshold.active,
                d.threshold.percentile * 100.0,
                d.threshold.percentile_value,
                d.threshold.floor,
                d.dense_cells
            );
        }
        if let Some(r) = &self.regions {
            println!(
                "  regions: found={} merged={} filtered={} (min {} px, merge gap {} px)",
                r.found.len(),
                r.merged.len(),
                r.filtered.len(),
                r.min_region_pixels,
                r.merge_gap_px
            );
        }
        if let Some(c) = &self.cluster {
            println!(
                "  clusters: {} (sparse removed {}, merge distance {:.0})",
                c.clusters.len(),
                c.sparse_removed.len(),
                c.merge_distance
            );
            for (i, cl) in c.clusters.iter().enumerate() {
                let mut reasons = Vec::new();
                if cl.low_score {
                    reasons.push("low score");
                }
                if cl.small_area {
                    reasons.push("small area");
                }
                println!(
                    "    #{}: {} regions, score {:.2}, area {:.0} -> {}{}",
                    i + 1,
                    cl.members.len(),
                    cl.score,
                    cl.area,
                    if cl.kept { "kept" } else { "rejected" },
                    if reasons.is_empty() {
                        String::new()
                    } else {
                        format!(" [{}]", reasons.join(", "))
                    }
                );
            }
        }
        println!("  kept regions: {}", self.kept.len());
        for r in &self.kept {
            println!("    {}x{} at ({}, {}) score {:.2}", r.w, r.h, r.x, r.y, r.score);
        }
        match &self.layout {
            Some(plan) => println!(
                "  canvas: {}x{} (scale {:.4})",
                plan.width, plan.height, plan.scale
            ),
            None => println!("  canvas: none (pass-through)"),
        }
        let stages: Vec<String> = self
            .timings
            .stages
            .iter()
            .map(|s| format!("{}={:.3}", s.label, s.elapsed_ms))
            .collect();
        println!("\nTimings (ms): {} total={:.3}", stages.join(" "), self.timings.total_ms);
    }
}
