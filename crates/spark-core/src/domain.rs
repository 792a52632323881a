// File: crates/spark-core/src/domain.rs
// Summary: Shared vertical value range across all series of a chart.

use crate::series::Series;

/// Smallest span a domain may have.
pub const MIN_SPAN: f64 = 1e-9;

/// Value range every series is scaled against. `span` is always positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
    pub span: f64,
}

impl Default for Domain {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0, span: 1.0 }
    }
}

impl Domain {
    /// Position of `v` within the domain, 0 at `min` and 1 at `max`.
    #[inline]
    pub fn normalize(&self, v: f64) -> f64 {
        (v - self.min) / self.span
    }
}

/// Compute the domain over every finite point of every series.
///
/// Equal extremes widen `max` to `min + 1`; no finite values at all gives
/// `{0, 1, 1}`.
pub fn compute_domain(series: &[Series]) -> Domain {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in series.iter().flat_map(Series::finite_points) {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return Domain::default();
    }
    let max = if max == min { min + 1.0 } else { max };
    Domain { min, max, span: (max - min).max(MIN_SPAN) }
}
