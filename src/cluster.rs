//! Group-level outlier rejection over filtered regions.
//!
//! Two stages:
//! 1. A pre-filter drops large sparse regions (page frames, hollow borders):
//!    area above `sparse_area_factor × median` and density below
//!    `sparse_density_factor × max density`. It never drops everything.
//! 2. Regions are grouped by single-linkage proximity (rectangle gap below
//!    `max(domain_w, domain_h) × merge_distance_fraction`) and whole
//!    clusters are kept or rejected relative to the best cluster.
use crate::extractor::params::ClusterOptions;
use crate::regions::{bounding_box, Region};
use log::{debug, info, warn};
use serde::Serialize;

/// One proximity cluster and the keep decision taken for it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    /// Indices into the post-pre-filter region list.
    pub members: Vec<usize>,
    pub score: f64,
    /// Area of the members' union bounding box.
    pub area: f64,
    pub kept: bool,
    pub low_score: bool,
    pub small_area: bool,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterReport {
    pub input_regions: usize,
    pub sparse_removed: Vec<Region>,
    /// The pre-filter matched every region and was skipped.
    pub prefilter_aborted: bool,
    pub merge_distance: f64,
    pub clusters: Vec<ClusterSummary>,
    /// No cluster passed the keep rule, all regions were retained.
    pub keep_fallback: bool,
    pub output_regions: usize,
}

/// Drop large sparse regions. Returns `(kept, removed, aborted)`.
pub fn prefilter_sparse(
    regions: Vec<Region>,
    options: &ClusterOptions,
) -> (Vec<Region>, Vec<Region>, bool) {
    if regions.len() < 2 {
        return (regions, Vec::new(), false);
    }
    let mut areas: Vec<f64> = regions.iter().map(|r| r.area() as f64).collect();
    areas.sort_by(|a, b| a.total_cmp(b));
    let median_area = areas[(areas.len() - 1) / 2];
    let max_density = regions.iter().map(Region::density).fold(0.0, f64::max);

    let is_sparse = |r: &Region| {
        r.area() as f64 > median_area * options.sparse_area_factor
            && r.density() < max_density * options.sparse_density_factor
    };
    let (removed, kept): (Vec<Region>, Vec<Region>) =
        regions.iter().copied().partition(is_sparse);

    if removed.is_empty() {
        return (regions, removed, false);
    }
    if kept.is_empty() {
        warn!(
            "prefilter_sparse: all {} regions look sparse, keeping them",
            regions.len()
        );
        return (regions, Vec::new(), true);
    }
    for r in &removed {
        debug!(
            "prefilter_sparse: dropping {}x{} at ({}, {}), density {:.4} (max {:.4})",
            r.w,
            r.h,
            r.x,
            r.y,
            r.density(),
            max_density
        );
    }
    (kept, removed, false)
}

/// Single-linkage groups of regions whose gap is below `merge_distance`.
///
/// Each group lists region indices in ascending order; groups are ordered by
/// their first member.
pub fn cluster_regions(regions: &[Region], merge_distance: f64) -> Vec<Vec<usize>> {
    let mut sets = DisjointSet::new(regions.len());
    for i in 0..regions.len() {
        for j in (i + 1)..regions.len() {
            if regions[i].gap_to(&regions[j]) < merge_distance {
                sets.union(i, j);
            }
        }
    }
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut group_of_root = vec![usize::MAX; regions.len()];
    for i in 0..regions.len() {
        let root = sets.find(i);
        if group_of_root[root] == usize::MAX {
            group_of_root[root] = groups.len();
            groups.push(Vec::new());
        }
        groups[group_of_root[root]].push(i);
    }
    groups
}

/// Run the pre-filter and cluster keep rule over a `domain_w × domain_h`
/// pixel domain. Kept regions are returned cluster by cluster.
pub fn filter_clusters(
    regions: Vec<Region>,
    domain_w: usize,
    domain_h: usize,
    options: &ClusterOptions,
) -> (Vec<Region>, ClusterReport) {
    let mut report = ClusterReport {
        input_regions: regions.len(),
        ..Default::default()
    };
    let (regions, removed, aborted) = prefilter_sparse(regions, options);
    if !removed.is_empty() {
        info!("cluster filter: removed {} large sparse regions", removed.len());
    }
    report.sparse_removed = removed;
    report.prefilter_aborted = aborted;
    if regions.is_empty() {
        return (regions, report);
    }

    let merge_distance =
        (domain_w.max(domain_h) as f64 * options.merge_distance_fraction).floor();
    report.merge_distance = merge_distance;
    let groups = cluster_regions(&regions, merge_distance);

    let mut summaries: Vec<ClusterSummary> = groups
        .into_iter()
        .map(|members| {
            let member_regions: Vec<Region> = members.iter().map(|&i| regions[i]).collect();
            let score = member_regions.iter().map(|r| r.score).sum();
            let area = bounding_box(&member_regions)
                .map(|(x0, y0, x1, y1)| ((x1 - x0) * (y1 - y0)) as f64)
                .unwrap_or(0.0);
            ClusterSummary {
                members,
                score,
                area,
                kept: true,
                low_score: false,
                small_area: false,
            }
        })
        .collect();

    let max_score = summaries.iter().map(|c| c.score).fold(0.0, f64::max);
    let max_area = summaries.iter().map(|c| c.area).fold(0.0, f64::max);
    let single = summaries.len() == 1;
    for c in &mut summaries {
        c.low_score = !(c.score > max_score * options.keep_score_ratio);
        c.small_area = !(c.area > max_area * options.keep_area_ratio);
        c.kept = single || (!c.low_score && !c.small_area);
        debug!(
            "cluster of {}: score {:.2}, area {:.0} ({:.1}% of max) -> {}",
            c.members.len(),
            c.score,
            c.area,
            if max_area > 0.0 { c.area / max_area * 100.0 } else { 0.0 },
            if c.kept { "kept" } else { "rejected" }
        );
    }

    let kept: Vec<Region> = summaries
        .iter()
        .filter(|c| c.kept)
        .flat_map(|c| c.members.iter().map(|&i| regions[i]))
        .collect();
    let output = if kept.is_empty() {
        report.keep_fallback = true;
        regions
    } else {
        if kept.len() < regions.len() {
            info!(
                "cluster filter: rejected {} outlying regions, {} kept",
                regions.len() - kept.len(),
                kept.len()
            );
        }
        kept
    };
    report.clusters = summaries;
    report.output_regions = output.len();
    (output, report)
}

struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}
