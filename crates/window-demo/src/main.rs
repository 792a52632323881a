// File: crates/window-demo/src/main.rs
// Summary: Windowed demo hosting the sparkline with winit. Window resizes, redraw
// requests and cursor events drive the chart's scheduler; frames are blitted via softbuffer.

use anyhow::{Context, Result};
use chrono::Local;
use spark_core::kpi::{chart_data, demo_rows};
use spark_core::scheduler::{FrameClock, FrameOutcome, FrameToken, ObserverHandle, ResizeObserver};
use spark_core::theme;
use spark_core::{ChartHost, LayoutBox, RasterSurface, SparklineChart, SparklineOptions, SparklineProps};
use std::num::NonZeroU32;
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

/// Host backed by a winit window. One animation frame maps to one `RedrawRequested`.
struct WindowHost {
    size: PhysicalSize<u32>,
    scale: f64,
    next_token: u64,
    pending: Option<FrameToken>,
    next_observer: u64,
    observer: Option<ObserverHandle>,
}

impl WindowHost {
    fn new(size: PhysicalSize<u32>, scale: f64) -> Self {
        Self { size, scale, next_token: 1, pending: None, next_observer: 1, observer: None }
    }

    fn observing(&self) -> bool {
        self.observer.is_some()
    }
}

impl FrameClock for WindowHost {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
    }
}

impl ResizeObserver for WindowHost {
    fn observe(&mut self) -> ObserverHandle {
        let handle = ObserverHandle(self.next_observer);
        self.next_observer += 1;
        self.observer = Some(handle);
        handle
    }

    fn disconnect(&mut self, handle: ObserverHandle) {
        if self.observer == Some(handle) {
            self.observer = None;
        }
    }
}

impl ChartHost for WindowHost {
    fn container_bounds(&self) -> LayoutBox {
        let scale = self.scale.max(f64::EPSILON);
        LayoutBox::from_size(self.size.width as f64 / scale, self.size.height as f64 / scale)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.scale
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Arg: theme name (light|dark)
    let theme = theme::find(&std::env::args().nth(1).unwrap_or_else(|| "light".to_string()));
    let data = chart_data(&demo_rows(Local::now().date_naive()));
    let props = SparklineProps::new(data.x_labels, data.series).with_title("Revenue, cost and net");

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(format!("MetricROI - {}", props.title.as_deref().unwrap_or("Sparkline")))
        .with_inner_size(winit::dpi::LogicalSize::new(720.0, props.height))
        .build(&event_loop)
        .context("build window")?;

    let context = unsafe { softbuffer::Context::new(&window) }
        .map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }
        .map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

    let mut host = WindowHost::new(window.inner_size(), window.scale_factor());
    let mut chart = SparklineChart::new(props, RasterSurface::new())
        .with_options(SparklineOptions { theme, ..SparklineOptions::default() });
    chart.mount(&mut host);

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    chart.unmount(&mut host);
                    *cf = ControlFlow::Exit;
                }
                WindowEvent::Resized(new_size) => {
                    host.size = new_size;
                    if host.observing() {
                        chart.on_resize(&mut host);
                    }
                }
                WindowEvent::ScaleFactorChanged { scale_factor, new_inner_size } => {
                    host.scale = scale_factor;
                    host.size = *new_inner_size;
                    if host.observing() {
                        chart.on_resize(&mut host);
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let logical = position.to_logical::<f64>(host.scale);
                    chart.pointer_move(logical.x, logical.y, &mut host);
                }
                WindowEvent::CursorLeft { .. } => {
                    chart.pointer_leave(&mut host);
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                if host.pending.is_some() {
                    window.request_redraw();
                }
            }
            Event::RedrawRequested(_) => {
                if let Some(token) = host.pending.take() {
                    match chart.on_frame(token, &mut host) {
                        FrameOutcome::GaveUp => tracing::warn!("chart gave up waiting for a drawable window"),
                        outcome => tracing::trace!(?outcome, "frame"),
                    }
                }
                if let Err(e) = present(&mut surface, &mut chart, host.size) {
                    tracing::warn!("present failed: {e:#}");
                }
            }
            _ => {}
        }
    });
}

/// Copy the chart's last frame into the window, composited over white.
fn present(
    surface: &mut softbuffer::Surface,
    chart: &mut SparklineChart<RasterSurface>,
    size: PhysicalSize<u32>,
) -> Result<()> {
    let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
        return Ok(());
    };
    surface.resize(w, h).map_err(|e| anyhow::anyhow!("resize buffer: {e}"))?;

    let (rgba, src_w, src_h) = chart.surface_mut().to_rgba8()?;
    let mut frame = surface.buffer_mut().map_err(|e| anyhow::anyhow!("buffer: {e}"))?;
    frame.fill(0x00FF_FFFF);

    let (dst_w, dst_h) = (size.width as usize, size.height as usize);
    let copy_w = dst_w.min(src_w as usize);
    for y in 0..dst_h.min(src_h as usize) {
        let src_row = &rgba[y * src_w as usize * 4..][..copy_w * 4];
        let dst_row = &mut frame[y * dst_w..][..copy_w];
        for (dst, px) in dst_row.iter_mut().zip(src_row.chunks_exact(4)) {
            let a = px[3] as u32;
            let over = |c: u8| (c as u32 * a + 255 * (255 - a)) / 255;
            // softbuffer expects 0RGB
            *dst = (over(px[0]) << 16) | (over(px[1]) << 8) | over(px[2]);
        }
    }
    frame.present().map_err(|e| anyhow::anyhow!("present: {e}"))?;
    Ok(())
}
