// File: crates/spark-core/tests/render.rs
// Purpose: Frame layout, backing-store sizing and a few rendered pixels.

use spark_core::{draw_chart, plan_frame, RasterSurface, Series, SparklineOptions, Surface, Viewport};

fn pixel(px: &[u8], width: i32, x: i32, y: i32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [px[i], px[i + 1], px[i + 2], px[i + 3]]
}

/// Three flat lines at 0, 1 and 2: the middle one sits at css y = 30 in a 100x60 box.
fn flat_lines() -> Vec<Series> {
    vec![
        Series::new("low", vec![0.0, 0.0]),
        Series::new("mid", vec![1.0, 1.0]),
        Series::new("high", vec![2.0, 2.0]),
    ]
}

#[test]
fn plan_keeps_index_spacing_across_gaps() {
    let plan = plan_frame(100.0, 60.0, &[Series::new("Revenue", vec![100.0, f64::NAN, 300.0])]);
    assert_eq!(plan.lines.len(), 1);
    let xs: Vec<f64> = plan.lines[0].points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = plan.lines[0].points.iter().map(|p| p.1).collect();
    assert_eq!(xs, vec![10.0, 50.0, 90.0]);
    // Domain is 100..300; the gap plots as 0, below the plot rect.
    assert_eq!(ys, vec![50.0, 70.0, 10.0]);
}

#[test]
fn plan_gridlines_and_plot_rect() {
    let plan = plan_frame(100.0, 60.0, &[]);
    assert_eq!(plan.gridlines, vec![10.0, 20.0, 30.0, 40.0, 50.0]);
    assert_eq!((plan.plot.left, plan.plot.top, plan.plot.width, plan.plot.height), (10.0, 10.0, 80.0, 40.0));

    // Boxes smaller than the padding still get a 1px plot.
    let tiny = plan_frame(12.0, 5.0, &[]);
    assert_eq!((tiny.plot.width, tiny.plot.height), (1.0, 1.0));
}

#[test]
fn plan_skips_short_series_but_keeps_palette_slot() {
    let plan = plan_frame(100.0, 60.0, &[
        Series::new("single", vec![5.0]),
        Series::new("pair", vec![1.0, 2.0]),
    ]);
    assert_eq!(plan.lines.len(), 1);
    assert_eq!(plan.lines[0].series_index, 1);
}

#[test]
fn backing_store_tracks_css_size_and_dpr() {
    let mut surface = RasterSurface::new();
    let opts = SparklineOptions::default();

    assert!(draw_chart(&mut surface, &Viewport::new(100.0, 60.0, 2.0), &flat_lines(), &opts));
    assert_eq!(surface.pixel_size(), (200, 120));
    assert_eq!(surface.reallocations(), 1);

    // Same size: no reallocation.
    assert!(draw_chart(&mut surface, &Viewport::new(100.0, 60.0, 2.0), &flat_lines(), &opts));
    assert_eq!(surface.reallocations(), 1);

    // Fractional device size floors.
    assert!(draw_chart(&mut surface, &Viewport::new(101.0, 61.0, 1.5), &flat_lines(), &opts));
    assert_eq!(surface.pixel_size(), (151, 91));
    assert_eq!(surface.reallocations(), 2);
}

#[test]
fn zero_viewport_never_yields_empty_surface() {
    let mut surface = RasterSurface::new();
    assert!(draw_chart(&mut surface, &Viewport::new(0.0, 0.0, 1.0), &flat_lines(), &SparklineOptions::default()));
    assert_eq!(surface.pixel_size(), (1, 1));
}

#[test]
fn failed_reallocation_keeps_previous_store_and_recovers() {
    let mut surface = RasterSurface::new();
    let opts = SparklineOptions::default();
    assert!(draw_chart(&mut surface, &Viewport::new(320.0, 160.0, 1.0), &flat_lines(), &opts));
    assert_eq!(surface.reallocations(), 1);

    // Far beyond what Skia will allocate.
    assert!(!draw_chart(&mut surface, &Viewport::new(1e9, 1e9, 2.0), &flat_lines(), &opts));
    assert_eq!(surface.pixel_size(), (320, 160));
    assert_eq!(surface.reallocations(), 1);
    assert!(surface.canvas().is_some());

    // Back to a sane size: draws again.
    assert!(draw_chart(&mut surface, &Viewport::new(200.0, 100.0, 1.0), &flat_lines(), &opts));
    assert_eq!(surface.pixel_size(), (200, 100));
    assert_eq!(surface.reallocations(), 2);
}

#[test]
fn explicit_size_surface_skips_matching_reallocation() {
    let mut surface = RasterSurface::with_size(100, 60).expect("raster surface");
    assert_eq!(surface.pixel_size(), (100, 60));
    assert!(draw_chart(&mut surface, &Viewport::new(100.0, 60.0, 1.0), &flat_lines(), &SparklineOptions::default()));
    assert_eq!(surface.reallocations(), 0);

    assert!(RasterSurface::with_size(i32::MAX, i32::MAX).is_err());
}

#[test]
fn detached_surface_reports_failure_without_drawing() {
    let mut surface = RasterSurface::detached();
    let before = surface.pixel_size();
    assert!(!draw_chart(&mut surface, &Viewport::new(100.0, 60.0, 1.0), &flat_lines(), &SparklineOptions::default()));
    assert_eq!(surface.pixel_size(), before);
    assert_eq!(surface.reallocations(), 0);

    surface.attach();
    assert!(draw_chart(&mut surface, &Viewport::new(100.0, 60.0, 1.0), &flat_lines(), &SparklineOptions::default()));
}

#[test]
fn lines_use_palette_and_stay_inside_plot() {
    let mut surface = RasterSurface::new();
    assert!(draw_chart(&mut surface, &Viewport::new(100.0, 60.0, 1.0), &flat_lines(), &SparklineOptions::default()));
    let (px, w, h) = surface.to_rgba8().expect("rgba readback");
    assert_eq!((w, h), (100, 60));
    assert_eq!(px.len(), (w * h * 4) as usize);

    // Middle series, second palette colour (#666666), fully covers row 29.
    assert_eq!(pixel(&px, w, 50, 29), [0x66, 0x66, 0x66, 255]);
    // Padding stays clear: left of the round cap, and above the plot.
    assert_eq!(pixel(&px, w, 3, 29)[3], 0);
    assert_eq!(pixel(&px, w, 96, 29)[3], 0);
    assert_eq!(pixel(&px, w, 50, 4)[3], 0);
}

#[test]
fn palette_wraps_for_extra_series() {
    // Domain 0..4 over a 40px-high plot: value 2 sits at css y = 30.
    let series = vec![
        Series::new("a", vec![0.0, 0.0]),
        Series::new("b", vec![1.0, 1.0]),
        Series::new("c", vec![4.0, 4.0]),
        Series::new("d", vec![2.0, 2.0]),
    ];
    let opts = SparklineOptions::default();
    assert_eq!(opts.theme.series_color(3), opts.theme.series_color(0));

    let mut surface = RasterSurface::new();
    assert!(draw_chart(&mut surface, &Viewport::new(100.0, 60.0, 1.0), &series, &opts));
    let (px, w, _) = surface.to_rgba8().expect("rgba readback");
    // Fourth series reuses the first palette colour (#111111).
    assert_eq!(pixel(&px, w, 50, 29), [0x11, 0x11, 0x11, 255]);
    // Second series, #666666, at css y = 40.
    assert_eq!(pixel(&px, w, 50, 39), [0x66, 0x66, 0x66, 255]);
}

#[test]
fn device_pixel_ratio_scales_drawing() {
    let mut surface = RasterSurface::new();
    assert!(draw_chart(&mut surface, &Viewport::new(100.0, 60.0, 2.0), &flat_lines(), &SparklineOptions::default()));
    let (px, w, _) = surface.to_rgba8().expect("rgba readback");
    // css (50, 29.5) -> device (100, 59), inside the 4px-wide stroke.
    assert_eq!(pixel(&px, w, 100, 59), [0x66, 0x66, 0x66, 255]);
    assert_eq!(pixel(&px, w, 100, 8)[3], 0);
}

#[test]
fn redraw_clears_previous_frame_and_does_not_accumulate() {
    let mut surface = RasterSurface::new();
    let vp = Viewport::new(100.0, 60.0, 1.0);
    let opts = SparklineOptions::default();

    assert!(draw_chart(&mut surface, &vp, &flat_lines(), &opts));
    let first = surface.to_rgba8().expect("rgba").0;
    assert!(draw_chart(&mut surface, &vp, &flat_lines(), &opts));
    let second = surface.to_rgba8().expect("rgba").0;
    assert_eq!(first, second, "repeated draws must be identical");

    // Dropping the middle line leaves only the faint gridline at row 29.
    let without_mid = vec![Series::new("low", vec![0.0, 0.0]), Series::new("high", vec![2.0, 2.0])];
    assert!(draw_chart(&mut surface, &vp, &without_mid, &opts));
    let (px, w, _) = surface.to_rgba8().expect("rgba");
    assert!(pixel(&px, w, 50, 29)[3] < 255);
}

#[test]
fn png_export_has_header() {
    let mut surface = RasterSurface::new();
    assert!(draw_chart(&mut surface, &Viewport::new(120.0, 48.0, 1.0), &flat_lines(), &SparklineOptions::default()));
    let bytes = surface.to_png_bytes().expect("png bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}
