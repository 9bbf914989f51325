//! Percentile-based adaptive density threshold.
//!
//! A fixed cutoff fails across drawings with very different ink coverage, so
//! the active threshold is a percentile of the drawing's own cell densities,
//! floored by `min_cell_fill` so that a nearly empty sheet does not promote
//! noise to content.
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveThreshold {
    pub percentile: f64,
    pub percentile_value: f64,
    pub floor: f64,
    pub active: f64,
}

impl AdaptiveThreshold {
    pub fn compute(values: &[f64], percentile_p: f64, min_cell_fill: f64) -> Self {
        let percentile_value = percentile(values, percentile_p);
        Self {
            percentile: percentile_p,
            percentile_value,
            floor: min_cell_fill,
            active: min_cell_fill.max(percentile_value),
        }
    }
}

/// Value at rank `floor(p · (n - 1))` of the sorted values (`p` clamped to
/// `[0, 1]`); zero for an empty slice.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    let idx = (p * (sorted.len() - 1) as f64).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_uses_floor_rank() {
        let values: Vec<f64> = (0..11).rev().map(|v| v as f64).collect();
        assert_eq!(percentile(&values, 0.9), 9.0);
        assert_eq!(percentile(&values, 0.95), 9.0);
        assert_eq!(percentile(&values, 1.0), 10.0);
        assert_eq!(percentile(&values, -3.0), 0.0);
        assert_eq!(percentile(&values, 7.0), 10.0);
        assert_eq!(percentile(&[], 0.5), 0.0);
    }

    #[test]
    fn floor_wins_on_sparse_drawings() {
        let mut values = vec![0.0; 100];
        values[3] = 0.8;
        let t = AdaptiveThreshold::compute(&values, 0.9, 0.0025);
        assert_eq!(t.percentile_value, 0.0);
        assert_eq!(t.active, 0.0025);
    }

    #[test]
    fn percentile_wins_on_dense_drawings() {
        let values: Vec<f64> = (0..100).map(|v| v as f64 / 100.0).collect();
        let t = AdaptiveThreshold::compute(&values, 0.9, 0.0025);
        assert!((t.active - 0.89).abs() < 1e-12);
    }
}
