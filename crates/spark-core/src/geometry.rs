// File: crates/spark-core/src/geometry.rs
// Summary: CSS-pixel geometry shared by the renderer and the pointer mapper.

use crate::domain::Domain;

/// Inset of the plot rectangle from every edge of the chart box, in CSS px.
/// The pointer mapper must use the same value so hover lines up with the
/// rendered points.
pub const PAD: f64 = 10.0;

/// Horizontal gridlines drawn across the plot rectangle (4 intervals).
pub const GRID_LINES: usize = 5;

/// Container box as reported by the host layout, in viewport CSS px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutBox {
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self { left: 0.0, top: 0.0, width, height }
    }

    pub const fn from_ltwh(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Size floored to whole CSS pixels.
    pub fn floored_size(&self) -> (i32, i32) {
        (self.width.floor() as i32, self.height.floor() as i32)
    }
}

/// Current CSS size of the chart plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub css_width: f64,
    pub css_height: f64,
    pub dpr: f64,
}

impl Viewport {
    pub fn new(css_width: f64, css_height: f64, dpr: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self { css_width, css_height, dpr }
    }

    /// Backing store size in device pixels; never below 1x1.
    pub fn backing_size(&self) -> (i32, i32) {
        let w = (self.css_width * self.dpr).floor().max(1.0) as i32;
        let h = (self.css_height * self.dpr).floor().max(1.0) as i32;
        (w, h)
    }
}

/// Padded inner area where gridlines and series are drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRect {
    /// Inset `PAD` on all sides of a `css_width` x `css_height` box.
    pub fn inset(css_width: f64, css_height: f64) -> Self {
        Self {
            left: PAD,
            top: PAD,
            width: (css_width - PAD * 2.0).max(1.0),
            height: (css_height - PAD * 2.0).max(1.0),
        }
    }

    pub fn right(&self) -> f64 { self.left + self.width }
    pub fn bottom(&self) -> f64 { self.top + self.height }

    /// X of point `index` out of `count`; spacing depends only on the index.
    #[inline]
    pub fn x_at(&self, index: usize, count: usize) -> f64 {
        let denom = count.saturating_sub(1).max(1) as f64;
        self.left + self.width * index as f64 / denom
    }

    /// Y of `value` scaled into the domain; larger values are higher up.
    #[inline]
    pub fn y_at(&self, value: f64, domain: &Domain) -> f64 {
        self.top + self.height - domain.normalize(value) * self.height
    }

    /// Y positions of the horizontal gridlines, top to bottom.
    pub fn gridlines(&self) -> Vec<f64> {
        linspace(self.top, self.bottom(), GRID_LINES)
    }
}

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
