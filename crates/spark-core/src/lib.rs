// File: crates/spark-core/src/lib.rs
// Summary: Core library entry point; exports the sparkline chart, its scheduler and KPI helpers.

pub mod component;
pub mod domain;
pub mod error;
pub mod format;
pub mod geometry;
pub mod host;
pub mod hover;
pub mod kpi;
pub mod overlay;
pub mod render;
pub mod scheduler;
pub mod series;
pub mod surface;
pub mod theme;

pub use component::{ChartHost, Lifecycle, SparklineChart, SparklineProps};
pub use domain::{compute_domain, Domain};
pub use error::SparkError;
pub use format::money;
pub use geometry::{LayoutBox, PlotRect, Viewport, PAD};
pub use host::ManualHost;
pub use hover::{index_from_client_x, tooltip_text, TooltipState, TooltipText};
pub use render::{draw_chart, plan_frame, FramePlan, SparklineOptions};
pub use scheduler::{FrameClock, FrameOutcome, FrameToken, ObserverHandle, RedrawScheduler, ResizeObserver, MAX_RETRIES};
pub use series::Series;
pub use surface::{RasterSurface, Surface};
pub use theme::Theme;
