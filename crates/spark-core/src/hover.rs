// File: crates/spark-core/src/hover.rs
// Summary: Pointer-to-index mapping and tooltip text for the hovered point.

use crate::format::MISSING;
use crate::geometry::{clamp, LayoutBox, PlotRect};
use crate::series::Series;

/// Offset of the tooltip box from the pointer, in CSS px.
pub const TOOLTIP_OFFSET: f64 = 12.0;
/// Closest the tooltip box may sit to the container's top-left corner.
pub const TOOLTIP_MIN_INSET: f64 = 8.0;

/// Hovered data index plus the pointer position relative to the container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipState {
    pub index: usize,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

impl TooltipState {
    /// Top-left corner of the tooltip box, relative to the container.
    pub fn overlay_origin(&self) -> (f64, f64) {
        (
            (self.anchor_x + TOOLTIP_OFFSET).max(TOOLTIP_MIN_INSET),
            (self.anchor_y + TOOLTIP_OFFSET).max(TOOLTIP_MIN_INSET),
        )
    }
}

/// Rendered tooltip contents: the x label and one `"{series}: {value}"` line per series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipText {
    pub label: String,
    pub lines: Vec<String>,
}

/// Nearest data index for a pointer at viewport x `client_x`.
///
/// Maps into the same padded plot rectangle the renderer uses and clamps to
/// `[0, point_count - 1]`.
pub fn index_from_client_x(bounds: &LayoutBox, point_count: usize, client_x: f64) -> usize {
    if point_count <= 1 {
        return 0;
    }
    if bounds.width <= 0.0 {
        return 0;
    }

    let plot = PlotRect::inset(bounds.width, bounds.height);
    let x = clamp(client_x - bounds.left, plot.left, plot.right());
    let t = (x - plot.left) / plot.width;
    let last = point_count - 1;
    let idx = (t * last as f64).round();
    clamp(idx, 0.0, last as f64) as usize
}

/// Tooltip contents for `index`. Labels past the end of `x_labels` fall back
/// to `#n` (1-based); absent or non-finite values show as `MISSING`.
pub fn tooltip_text(
    index: usize,
    x_labels: &[String],
    series: &[Series],
    format_value: &dyn Fn(f64) -> String,
) -> TooltipText {
    let label = x_labels
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("#{}", index + 1));
    let lines = series
        .iter()
        .map(|s| {
            let value = s.value_at(index).map(format_value).unwrap_or_else(|| MISSING.to_string());
            format!("{}: {}", s.label, value)
        })
        .collect();
    TooltipText { label, lines }
}
