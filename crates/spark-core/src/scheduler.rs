// File: crates/spark-core/src/scheduler.rs
// Summary: Resize-aware redraw scheduling with one pending frame at a time and a
// bounded retry loop for zero-size containers and missing drawing contexts.
// Notes:
// - The host's animation-frame and resize-notification primitives are injected
//   through `FrameClock` and `ResizeObserver`. The host reports a fired frame
//   by calling back with its token and a resize by requesting a new draw.

use crate::geometry::LayoutBox;

/// Retries allowed per draw cycle after the first attempt.
pub const MAX_RETRIES: u32 = 20;

/// Identifies one requested animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// Identifies one resize subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverHandle(pub u64);

/// Host animation-frame primitive.
pub trait FrameClock {
    fn request_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Host resize-notification primitive for the chart's container.
pub trait ResizeObserver {
    fn observe(&mut self) -> ObserverHandle;
    fn disconnect(&mut self, handle: ObserverHandle);
}

/// What happened when a frame fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The renderer painted a frame.
    Drawn,
    /// Nothing drawn; another frame was requested.
    Retrying,
    /// Nothing drawn and the retry budget is spent for this cycle.
    GaveUp,
    /// The frame was cancelled or superseded, or the scheduler is detached.
    Stale,
}

#[derive(Debug, Default)]
pub struct RedrawScheduler {
    pending: Option<FrameToken>,
    retries: u32,
    observer: Option<ObserverHandle>,
    active: bool,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between `attach` and `detach`.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    /// Start accepting draw requests and subscribe to resizes. Subscribing
    /// again while a subscription exists is a no-op.
    pub fn attach<H: ResizeObserver + ?Sized>(&mut self, host: &mut H) {
        self.active = true;
        if self.observer.is_none() {
            self.observer = Some(host.observe());
        }
    }

    /// Cancel the pending frame and drop the resize subscription. Later
    /// requests are ignored and stray frame callbacks are reported stale.
    pub fn detach<H: FrameClock + ResizeObserver + ?Sized>(&mut self, host: &mut H) {
        self.active = false;
        if let Some(token) = self.pending.take() {
            host.cancel_frame(token);
        }
        if let Some(handle) = self.observer.take() {
            host.disconnect(handle);
        }
        self.retries = 0;
    }

    /// Start a fresh draw cycle, replacing any frame still pending.
    /// Returns false when detached.
    pub fn request<C: FrameClock + ?Sized>(&mut self, clock: &mut C) -> bool {
        if !self.active {
            return false;
        }
        self.retries = 0;
        self.schedule(clock);
        true
    }

    /// Handle the frame `token` fired by the host.
    ///
    /// `bounds` is the container measured for this frame; `draw` receives the
    /// floored CSS size and reports whether it could paint.
    pub fn run_frame<C, D>(
        &mut self,
        token: FrameToken,
        clock: &mut C,
        bounds: LayoutBox,
        draw: D,
    ) -> FrameOutcome
    where
        C: FrameClock + ?Sized,
        D: FnOnce(i32, i32) -> bool,
    {
        if !self.active || self.pending != Some(token) {
            tracing::trace!(token = token.0, "ignoring stale frame");
            return FrameOutcome::Stale;
        }
        self.pending = None;

        let (width, height) = bounds.floored_size();
        if width <= 0 || height <= 0 {
            return self.retry(clock, "container has no size yet");
        }
        if draw(width, height) {
            self.retries = 0;
            FrameOutcome::Drawn
        } else {
            self.retry(clock, "drawing context unavailable")
        }
    }

    fn schedule<C: FrameClock + ?Sized>(&mut self, clock: &mut C) {
        if let Some(previous) = self.pending.take() {
            tracing::trace!(token = previous.0, "coalescing pending frame");
            clock.cancel_frame(previous);
        }
        self.pending = Some(clock.request_frame());
    }

    fn retry<C: FrameClock + ?Sized>(&mut self, clock: &mut C, reason: &'static str) -> FrameOutcome {
        self.retries += 1;
        if self.retries <= MAX_RETRIES {
            self.schedule(clock);
            FrameOutcome::Retrying
        } else {
            tracing::debug!(retries = MAX_RETRIES, reason, "giving up on redraw until the next resize or data change");
            FrameOutcome::GaveUp
        }
    }
}
