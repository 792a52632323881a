// File: crates/spark-core/src/theme.rs
// Summary: Light/Dark colour presets for the sparkline and its tooltip overlay.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    /// Colour the frame is cleared to before drawing.
    pub background: skia::Color,
    pub grid: skia::Color,
    pub grid_alpha: f32,
    /// Series colours, assigned by series position and cycled.
    pub palette: [skia::Color; 3],
    pub tooltip_fill: skia::Color,
    pub tooltip_border: skia::Color,
    pub tooltip_label: skia::Color,
    pub tooltip_value: skia::Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::TRANSPARENT,
            grid: skia::Color::from_rgb(0xe9, 0xe9, 0xe9),
            grid_alpha: 0.6,
            palette: [
                skia::Color::from_rgb(0x11, 0x11, 0x11),
                skia::Color::from_rgb(0x66, 0x66, 0x66),
                skia::Color::from_rgb(0x99, 0x99, 0x99),
            ],
            tooltip_fill: skia::Color::WHITE,
            tooltip_border: skia::Color::from_rgb(0xdd, 0xdd, 0xdd),
            tooltip_label: skia::Color::from_argb(191, 0x11, 0x11, 0x11),
            tooltip_value: skia::Color::from_rgb(0x11, 0x11, 0x11),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            grid_alpha: 0.6,
            palette: [
                skia::Color::from_argb(255, 64, 160, 255),
                skia::Color::from_argb(255, 40, 200, 120),
                skia::Color::from_argb(255, 220, 80, 80),
            ],
            tooltip_fill: skia::Color::from_argb(255, 30, 30, 34),
            tooltip_border: skia::Color::from_argb(255, 60, 60, 68),
            tooltip_label: skia::Color::from_argb(191, 235, 235, 245),
            tooltip_value: skia::Color::from_argb(255, 235, 235, 245),
        }
    }

    /// Colour of the series at `index`, cycling through the palette.
    pub fn series_color(&self, index: usize) -> skia::Color {
        self.palette[index % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self { Theme::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
