// File: crates/spark-core/src/component.rs
// Summary: One mounted sparkline chart: props, surface, redraw scheduling and hover state.
// Notes:
// - Lifecycle: Unmounted -> Mounting -> Idle <-> Hovering -> Unmounting -> Unmounted.
//   Draws are only requested from Idle/Hovering, so nothing paints after unmount.

use crate::format::money;
use crate::geometry::{LayoutBox, Viewport};
use crate::hover::{index_from_client_x, tooltip_text, TooltipState, TooltipText};
use crate::overlay::{draw_tooltip, TextShaper};
use crate::render::{draw_chart, SparklineOptions};
use crate::scheduler::{FrameClock, FrameOutcome, FrameToken, RedrawScheduler, ResizeObserver};
use crate::series::{point_count, Series};
use crate::surface::Surface;

/// Default chart height in CSS px.
pub const DEFAULT_HEIGHT: f64 = 160.0;

/// Everything the chart needs from its host environment.
pub trait ChartHost: FrameClock + ResizeObserver {
    /// Current layout box of the chart's container.
    fn container_bounds(&self) -> LayoutBox;

    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }
}

pub type ValueFormatter = Box<dyn Fn(f64) -> String>;

#[derive(Clone, Debug, PartialEq)]
pub struct SparklineProps {
    pub title: Option<String>,
    /// Container height in CSS px; the host lays the container out with it.
    pub height: f64,
    pub x_labels: Vec<String>,
    pub series: Vec<Series>,
}

impl SparklineProps {
    pub fn new(x_labels: Vec<String>, series: Vec<Series>) -> Self {
        Self { title: None, height: DEFAULT_HEIGHT, x_labels, series }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Unmounted,
    Mounting,
    Idle,
    Hovering,
    Unmounting,
}

impl Lifecycle {
    pub fn is_mounted(self) -> bool {
        matches!(self, Lifecycle::Idle | Lifecycle::Hovering)
    }
}

pub struct SparklineChart<S: Surface> {
    props: SparklineProps,
    format_value: ValueFormatter,
    options: SparklineOptions,
    surface: S,
    scheduler: RedrawScheduler,
    tooltip: Option<TooltipState>,
    lifecycle: Lifecycle,
    shaper: Option<TextShaper>,
    draws: usize,
}

impl<S: Surface> SparklineChart<S> {
    pub fn new(props: SparklineProps, surface: S) -> Self {
        Self {
            props,
            format_value: Box::new(money),
            options: SparklineOptions::default(),
            surface,
            scheduler: RedrawScheduler::new(),
            tooltip: None,
            lifecycle: Lifecycle::Unmounted,
            shaper: None,
            draws: 0,
        }
    }

    pub fn with_formatter(mut self, format_value: impl Fn(f64) -> String + 'static) -> Self {
        self.format_value = Box::new(format_value);
        self
    }

    pub fn with_options(mut self, options: SparklineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn props(&self) -> &SparklineProps { &self.props }
    pub fn options(&self) -> &SparklineOptions { &self.options }
    pub fn lifecycle(&self) -> Lifecycle { self.lifecycle }
    pub fn tooltip(&self) -> Option<&TooltipState> { self.tooltip.as_ref() }
    pub fn surface(&self) -> &S { &self.surface }
    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }
    pub fn scheduler(&self) -> &RedrawScheduler { &self.scheduler }

    /// Frames painted since construction.
    pub fn draw_count(&self) -> usize { self.draws }

    /// Accessible name for the drawing surface.
    pub fn accessible_label(&self) -> &str {
        self.props.title.as_deref().unwrap_or("Sparkline chart")
    }

    pub fn point_count(&self) -> usize {
        point_count(&self.props.series, &self.props.x_labels)
    }

    /// Subscribe to container resizes and schedule the first draw.
    pub fn mount<H: ChartHost + ?Sized>(&mut self, host: &mut H) {
        if self.lifecycle != Lifecycle::Unmounted {
            return;
        }
        self.lifecycle = Lifecycle::Mounting;
        self.scheduler.attach(host);
        self.lifecycle = Lifecycle::Idle;
        self.scheduler.request(host);
    }

    /// Cancel any pending frame and drop the resize subscription.
    pub fn unmount<H: ChartHost + ?Sized>(&mut self, host: &mut H) {
        if !self.lifecycle.is_mounted() {
            return;
        }
        self.lifecycle = Lifecycle::Unmounting;
        self.scheduler.detach(host);
        self.tooltip = None;
        self.lifecycle = Lifecycle::Unmounted;
    }

    /// Replace the plotted data and schedule a redraw.
    pub fn set_data<H: ChartHost + ?Sized>(&mut self, x_labels: Vec<String>, series: Vec<Series>, host: &mut H) {
        self.props.x_labels = x_labels;
        self.props.series = series;
        self.request_draw(host);
    }

    /// The container was resized.
    pub fn on_resize<H: ChartHost + ?Sized>(&mut self, host: &mut H) -> bool {
        self.request_draw(host)
    }

    /// Schedule a coalesced redraw. Ignored unless mounted.
    pub fn request_draw<H: ChartHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.lifecycle.is_mounted() {
            return false;
        }
        self.scheduler.request(host)
    }

    /// The host fired animation frame `token`.
    pub fn on_frame<H: ChartHost + ?Sized>(&mut self, token: FrameToken, host: &mut H) -> FrameOutcome {
        let bounds = host.container_bounds();
        let dpr = host.device_pixel_ratio();
        let Self { props, format_value, options, surface, scheduler, tooltip, shaper, draws, .. } = self;

        scheduler.run_frame(token, host, bounds, |width, height| {
            let viewport = Viewport::new(width as f64, height as f64, dpr);
            if !draw_chart(surface, &viewport, &props.series, options) {
                return false;
            }
            if let (true, Some(state)) = (options.show_tooltip, tooltip.as_ref()) {
                let text = tooltip_text(state.index, &props.x_labels, &props.series, &**format_value);
                let shaper = shaper.get_or_insert_with(TextShaper::new);
                draw_tooltip(surface, shaper, &viewport, state, &text, &options.theme);
            }
            *draws += 1;
            true
        })
    }

    /// Pointer moved over the surface at viewport coordinates.
    pub fn pointer_move<H: ChartHost + ?Sized>(&mut self, client_x: f64, client_y: f64, host: &mut H) -> Option<TooltipState> {
        if !self.lifecycle.is_mounted() {
            return None;
        }
        let count = self.point_count();
        if count == 0 {
            return None;
        }
        let bounds = host.container_bounds();
        let state = TooltipState {
            index: index_from_client_x(&bounds, count, client_x),
            anchor_x: client_x - bounds.left,
            anchor_y: client_y - bounds.top,
        };
        let changed = self.tooltip != Some(state);
        self.tooltip = Some(state);
        self.lifecycle = Lifecycle::Hovering;
        if changed && self.options.show_tooltip {
            self.scheduler.request(host);
        }
        Some(state)
    }

    /// Pointer left the surface.
    pub fn pointer_leave<H: ChartHost + ?Sized>(&mut self, host: &mut H) {
        if self.lifecycle != Lifecycle::Hovering {
            return;
        }
        self.tooltip = None;
        self.lifecycle = Lifecycle::Idle;
        if self.options.show_tooltip {
            self.scheduler.request(host);
        }
    }

    /// Tooltip contents for the hovered index, if any.
    pub fn tooltip_text(&self) -> Option<TooltipText> {
        let state = self.tooltip.as_ref()?;
        Some(tooltip_text(state.index, &self.props.x_labels, &self.props.series, &*self.format_value))
    }
}
