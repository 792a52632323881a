// File: crates/spark-core/src/host.rs
// Summary: Synchronous in-process host. Frames are queued until the caller pumps
// them, which makes redraw scheduling deterministic for headless rendering and tests.

use crate::component::{ChartHost, SparklineChart};
use crate::geometry::LayoutBox;
use crate::scheduler::{FrameClock, FrameOutcome, FrameToken, ObserverHandle, ResizeObserver};
use crate::surface::Surface;

/// Upper bound on frames pumped by `run_until_idle`.
const MAX_PUMPED_FRAMES: usize = 1_000;

#[derive(Debug)]
pub struct ManualHost {
    bounds: LayoutBox,
    dpr: f64,
    next_token: u64,
    queued: Vec<FrameToken>,
    requested: usize,
    cancelled: usize,
    next_observer: u64,
    observers: Vec<ObserverHandle>,
}

impl ManualHost {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            bounds: LayoutBox::from_size(width, height),
            dpr: 1.0,
            next_token: 1,
            queued: Vec::new(),
            requested: 0,
            cancelled: 0,
            next_observer: 1,
            observers: Vec::new(),
        }
    }

    pub fn with_dpr(mut self, dpr: f64) -> Self {
        self.dpr = dpr;
        self
    }

    pub fn with_bounds(mut self, bounds: LayoutBox) -> Self {
        self.bounds = bounds;
        self
    }

    /// Change the container size. Does not notify; call the chart's `on_resize`.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.bounds.width = width;
        self.bounds.height = height;
    }

    pub fn set_dpr(&mut self, dpr: f64) {
        self.dpr = dpr;
    }

    /// Frames requested and not cancelled, oldest first.
    pub fn queued_frames(&self) -> &[FrameToken] {
        &self.queued
    }

    /// Total frames ever requested.
    pub fn requested_frames(&self) -> usize {
        self.requested
    }

    /// Total frames cancelled while still queued.
    pub fn cancelled_frames(&self) -> usize {
        self.cancelled
    }

    /// Resize subscriptions currently attached.
    pub fn active_observers(&self) -> usize {
        self.observers.len()
    }

    /// Remove and return every queued frame.
    pub fn take_frames(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.queued)
    }

    /// Fire one animation frame: every frame queued right now is delivered,
    /// frames they request wait for the next tick.
    pub fn tick<S: Surface>(&mut self, chart: &mut SparklineChart<S>) -> Vec<FrameOutcome> {
        let frames = self.take_frames();
        frames.into_iter().map(|token| chart.on_frame(token, self)).collect()
    }

    /// Tick until no frames are queued.
    pub fn run_until_idle<S: Surface>(&mut self, chart: &mut SparklineChart<S>) -> Vec<FrameOutcome> {
        let mut outcomes = Vec::new();
        while !self.queued.is_empty() && outcomes.len() < MAX_PUMPED_FRAMES {
            outcomes.extend(self.tick(chart));
        }
        outcomes
    }
}

impl FrameClock for ManualHost {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.next_token);
        self.next_token += 1;
        self.requested += 1;
        self.queued.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let before = self.queued.len();
        self.queued.retain(|t| *t != token);
        if self.queued.len() != before {
            self.cancelled += 1;
        }
    }
}

impl ResizeObserver for ManualHost {
    fn observe(&mut self) -> ObserverHandle {
        let handle = ObserverHandle(self.next_observer);
        self.next_observer += 1;
        self.observers.push(handle);
        handle
    }

    fn disconnect(&mut self, handle: ObserverHandle) {
        self.observers.retain(|h| *h != handle);
    }
}

impl ChartHost for ManualHost {
    fn container_bounds(&self) -> LayoutBox {
        self.bounds
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }
}
