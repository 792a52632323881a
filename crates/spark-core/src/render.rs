// File: crates/spark-core/src/render.rs
// Summary: Sparkline frame layout and Skia painting (gridlines + one polyline per series).

use skia_safe as skia;

use crate::domain::{compute_domain, Domain};
use crate::geometry::{PlotRect, Viewport};
use crate::series::Series;
use crate::surface::Surface;
use crate::theme::Theme;

pub struct SparklineOptions {
    pub theme: Theme,
    /// Series stroke width in CSS px.
    pub line_width: f32,
    pub grid_width: f32,
    /// Paint the hover tooltip into the frame while the pointer is over the chart.
    pub show_tooltip: bool,
}

impl Default for SparklineOptions {
    fn default() -> Self {
        Self {
            theme: Theme::light(),
            line_width: 2.0,
            grid_width: 1.0,
            show_tooltip: true,
        }
    }
}

/// One series' vertices in CSS px.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub series_index: usize,
    pub points: Vec<(f64, f64)>,
}

/// Everything a frame draws, before any pixels are touched.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub plot: PlotRect,
    pub domain: Domain,
    pub gridlines: Vec<f64>,
    pub lines: Vec<Polyline>,
}

/// Lay out a frame for a `css_width` x `css_height` box.
pub fn plan_frame(css_width: f64, css_height: f64, series: &[Series]) -> FramePlan {
    let plot = PlotRect::inset(css_width, css_height);
    let domain = compute_domain(series);

    let lines = series
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_drawable())
        .map(|(series_index, s)| {
            let n = s.len();
            let points = (0..n)
                .map(|i| (plot.x_at(i, n), plot.y_at(s.plot_value(i), &domain)))
                .collect();
            Polyline { series_index, points }
        })
        .collect();

    FramePlan { plot, domain, gridlines: plot.gridlines(), lines }
}

/// Resize the backing store to match `viewport`. Returns false when the
/// store could not be reallocated; the previous one is left untouched.
pub fn ensure_backing_store<S: Surface + ?Sized>(surface: &mut S, viewport: &Viewport) -> bool {
    let wanted = viewport.backing_size();
    if surface.pixel_size() == wanted {
        return true;
    }
    tracing::trace!(width = wanted.0, height = wanted.1, "resizing backing store");
    surface.set_pixel_size(wanted.0, wanted.1)
}

/// Paint one frame. Returns false, without drawing, when the surface has no
/// drawing context yet or its backing store cannot be sized for `viewport`.
pub fn draw_chart<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: &Viewport,
    series: &[Series],
    opts: &SparklineOptions,
) -> bool {
    if surface.canvas().is_none() {
        return false;
    }
    if !ensure_backing_store(surface, viewport) {
        return false;
    }
    let Some(canvas) = surface.canvas() else {
        return false;
    };

    let plan = plan_frame(viewport.css_width, viewport.css_height, series);

    canvas.save();
    canvas.reset_matrix();
    canvas.scale((viewport.dpr as f32, viewport.dpr as f32));
    canvas.clear(opts.theme.background);

    let plot = &plan.plot;
    let clip = skia::Rect::from_xywh(
        plot.left as f32,
        plot.top as f32,
        plot.width as f32,
        plot.height as f32,
    );
    canvas.clip_rect(clip, skia::ClipOp::Intersect, true);

    draw_grid(canvas, &plan, opts);
    for line in &plan.lines {
        draw_polyline(canvas, line, opts.theme.series_color(line.series_index), opts.line_width);
    }

    canvas.restore();
    true
}

// ---- helpers ----------------------------------------------------------------

fn draw_grid(canvas: &skia::Canvas, plan: &FramePlan, opts: &SparklineOptions) {
    let mut paint = skia::Paint::default();
    paint.set_color(opts.theme.grid);
    paint.set_alpha_f(opts.theme.grid_alpha);
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(opts.grid_width);

    let (l, r) = (plan.plot.left as f32, plan.plot.right() as f32);
    for &y in &plan.gridlines {
        canvas.draw_line((l, y as f32), (r, y as f32), &paint);
    }
}

fn draw_polyline(canvas: &skia::Canvas, line: &Polyline, color: skia::Color, width: f32) {
    let Some(&(x0, y0)) = line.points.first() else {
        return;
    };

    let mut path = skia::Path::new();
    path.move_to((x0 as f32, y0 as f32));
    for &(x, y) in line.points.iter().skip(1) {
        path.line_to((x as f32, y as f32));
    }

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(width);
    stroke.set_stroke_join(skia::paint::Join::Round);
    stroke.set_stroke_cap(skia::paint::Cap::Round);
    stroke.set_color(color);

    canvas.draw_path(&path, &stroke);
}
