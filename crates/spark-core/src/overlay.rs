// File: crates/spark-core/src/overlay.rs
// Summary: Hover tooltip painted on top of a rendered frame, using Skia textlayout.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

use crate::geometry::Viewport;
use crate::hover::{TooltipState, TooltipText};
use crate::surface::Surface;
use crate::theme::Theme;

pub const TOOLTIP_WIDTH: f32 = 240.0;
const TOOLTIP_PADDING: f32 = 10.0;
const TOOLTIP_RADIUS: f32 = 14.0;
const LABEL_SIZE: f32 = 12.0;
const VALUE_SIZE: f32 = 13.0;
const LABEL_GAP: f32 = 6.0;
const LINE_GAP: f32 = 4.0;

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, bold: bool) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        if bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color, bold: bool, max_width: f32) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        pstyle.set_max_lines(1);
        pstyle.set_ellipsis("\u{2026}");
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, color, bold));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(max_width.max(1.0));
        paragraph
    }
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

/// Paint the tooltip box for `state` over the current frame. Returns false
/// when the surface has no drawing context.
pub fn draw_tooltip<S: Surface + ?Sized>(
    surface: &mut S,
    shaper: &TextShaper,
    viewport: &Viewport,
    state: &TooltipState,
    text: &TooltipText,
    theme: &Theme,
) -> bool {
    let Some(canvas) = surface.canvas() else {
        return false;
    };

    let text_width = TOOLTIP_WIDTH - TOOLTIP_PADDING * 2.0;
    let label = shaper.layout(&text.label, LABEL_SIZE, theme.tooltip_label, false, text_width);
    let lines: Vec<Paragraph> = text
        .lines
        .iter()
        .map(|l| shaper.layout(l, VALUE_SIZE, theme.tooltip_value, true, text_width))
        .collect();

    let lines_height: f32 = lines.iter().map(|p| p.height()).sum::<f32>()
        + LINE_GAP * lines.len().saturating_sub(1) as f32;
    let box_height = TOOLTIP_PADDING * 2.0 + label.height() + LABEL_GAP + lines_height;

    let (x, y) = state.overlay_origin();
    let (x, y) = (x as f32, y as f32);
    let rect = skia::Rect::from_xywh(x, y, TOOLTIP_WIDTH, box_height);

    canvas.save();
    canvas.reset_matrix();
    canvas.scale((viewport.dpr as f32, viewport.dpr as f32));

    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);
    fill.set_color(theme.tooltip_fill);
    canvas.draw_round_rect(rect, TOOLTIP_RADIUS, TOOLTIP_RADIUS, &fill);

    let mut border = skia::Paint::default();
    border.set_anti_alias(true);
    border.set_style(skia::paint::Style::Stroke);
    border.set_stroke_width(1.0);
    border.set_color(theme.tooltip_border);
    canvas.draw_round_rect(rect, TOOLTIP_RADIUS, TOOLTIP_RADIUS, &border);

    let left = x + TOOLTIP_PADDING;
    let mut cursor = y + TOOLTIP_PADDING;
    label.paint(canvas, (left, cursor));
    cursor += label.height() + LABEL_GAP;
    for line in &lines {
        line.paint(canvas, (left, cursor));
        cursor += line.height() + LINE_GAP;
    }

    canvas.restore();
    true
}
