//! Fixpoint merging of overlapping or nearby regions.
use super::types::Region;
use log::debug;

/// Merge distance used by the extractor: one margin's worth of cells (at
/// least one cell).
pub fn merge_gap_px(cell_size: usize, margin_cells: usize) -> i64 {
    (cell_size * margin_cells.max(1)) as i64
}

/// Repeatedly replace a mergeable pair by its union until a full pass finds
/// none. The output is a fixpoint: merging it again changes nothing.
pub fn merge_regions(regions: Vec<Region>, gap_px: i64) -> Vec<Region> {
    let mut current = regions;
    let mut passes = 0usize;
    while let Some((i, j)) = find_mergeable_pair(&current, gap_px) {
        let merged = current[i].union(&current[j]);
        // j > i, so removing j first keeps i valid
        current.remove(j);
        current.remove(i);
        current.push(merged);
        passes += 1;
    }
    debug!("merge_regions: {} merges, {} regions left", passes, current.len());
    current
}

fn find_mergeable_pair(regions: &[Region], gap_px: i64) -> Option<(usize, usize)> {
    for i in 0..regions.len() {
        for j in (i + 1)..regions.len() {
            if regions[i].overlaps_or_near(&regions[j], gap_px) {
                return Some((i, j));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chains_collapse_transitively() {
        let regions = vec![
            Region::new(0, 0, 10, 10, 1.0),
            Region::new(36, 0, 10, 10, 1.0),
            Region::new(18, 0, 10, 10, 1.0),
            Region::new(500, 500, 10, 10, 4.0),
        ];
        let merged = merge_regions(regions, 10);
        assert_eq!(merged.len(), 2);
        let chain = merged.iter().find(|r| r.x == 0).expect("merged chain");
        assert_eq!((chain.w, chain.h), (46, 10));
        assert_eq!(chain.score, 3.0);
    }

    #[test]
    fn merging_is_idempotent() {
        let regions = vec![
            Region::new(0, 0, 30, 30, 2.0),
            Region::new(25, 25, 30, 30, 1.0),
            Region::new(100, 0, 10, 10, 1.0),
            Region::new(100, 60, 10, 10, 1.0),
            Region::new(300, 300, 40, 5, 0.5),
        ];
        let once = merge_regions(regions, 16);
        let twice = merge_regions(once.clone(), 16);
        assert_eq!(once, twice);
        let total: f64 = once.iter().map(|r| r.score).sum();
        assert!((total - 5.5).abs() < 1e-12);
    }

    #[test]
    fn merge_gap_uses_at_least_one_cell() {
        assert_eq!(merge_gap_px(16, 0), 16);
        assert_eq!(merge_gap_px(16, 2), 32);
    }
}
