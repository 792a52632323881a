// File: crates/spark-core/src/series.rs
// Summary: Labeled numeric series plotted as one sparkline each.
// Notes:
// - Points are aligned by index to the chart's x labels. Non-finite points are
//   data gaps: they plot as 0 and show as missing in the tooltip.

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<f64>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<f64>) -> Self {
        Self { label: label.into(), points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Value at `index` if present and finite.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.points.get(index).copied().filter(|v| v.is_finite())
    }

    /// Value used for the polyline: gaps are substituted with 0 so the
    /// index-based x position of later points is kept.
    #[inline]
    pub fn plot_value(&self, index: usize) -> f64 {
        self.value_at(index).unwrap_or(0.0)
    }

    /// A line needs at least two points.
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Iterator over finite points only.
    pub fn finite_points(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().copied().filter(|v| v.is_finite())
    }
}

/// Number of hoverable positions: the longest series or the label count,
/// whichever is larger.
pub fn point_count(series: &[Series], x_labels: &[String]) -> usize {
    let longest = series.iter().map(Series::len).max().unwrap_or(0);
    longest.max(x_labels.len())
}
