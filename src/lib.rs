//! # Animated Order Book Depth Chart
//!
//! A rendering-backend independent engine for animated bid/ask depth charts.
//! It takes a time-series of flat order book snapshots and produces, frame by
//! frame, a keyed scene of bars, size labels, axes and a center line that any
//! drawing surface can consume. An SVG writer is included.
//!
//! ## Pipeline
//!
//! 1. **Normalization**: each flat record (`Time`, `Bid1`, `Bid1Size`,
//!    `Ask1`, `Ask1Size`, ... up to the configured level count) becomes a
//!    [`Frame`] with exactly two entries per level. Missing fields become
//!    `NaN` rather than errors.
//! 2. **Level ordering**: the vertical axis lists `ask-1..ask-K` above
//!    `bid-1..bid-K`, by level number and never by price.
//! 3. **Scales**: a symmetric linear size scale (`[-max, max]`, NaN-safe), a
//!    padded band scale over the level categories and a side color map.
//! 4. **Render sync**: bars and labels keyed by `(side, level)` go through an
//!    explicit enter/update/exit diff. Entering bars grow from the center,
//!    updated bars transition from wherever they are, exiting elements are
//!    removed immediately. Axes and the center line are redrawn every frame.
//! 5. **Playback**: a Stopped/Running state machine advances the frame index
//!    on a repeating tick and wraps around. Scrubbing always halts autoplay.
//!    Ticks come from a [`TickScheduler`]: a Tokio interval task, or a manual
//!    scheduler for tests and headless drivers.
//!
//! ## Example
//!
//! ```rust
//! use depth_chart_rs::prelude::*;
//!
//! let config = ChartConfig { levels: 2, ..ChartConfig::default() };
//! let mut chart = OrderBookChart::manual(config, 800.0, 400.0).unwrap();
//!
//! let records = records_from_json(r#"[
//!     {"Time": "09:30:00", "Bid1": 100.01, "Bid1Size": 500, "Ask1": 100.02, "Ask1Size": 300,
//!      "Bid2": 100.00, "Bid2Size": 800, "Ask2": 100.03, "Ask2Size": 200},
//!     {"Time": "09:30:01", "Bid1": 100.02, "Bid1Size": 450, "Ask1": 100.03, "Ask1Size": 350,
//!      "Bid2": 100.01, "Bid2Size": 700, "Ask2": 100.04, "Ask2Size": 250}
//! ]"#).unwrap();
//!
//! chart.load_at(&records, 0);
//! assert_eq!(chart.scene().bars.len(), 4);
//!
//! assert!(chart.start_animation());
//! let tick = chart.playback().scheduler().next_tick().unwrap();
//! chart.handle_tick_at(tick, 1_000);
//! assert_eq!(chart.current_time(), "09:30:01");
//!
//! let svg = chart.to_svg(1_300);
//! assert!(svg.starts_with("<svg"));
//! ```
//!
//! ## Limitations
//!
//! - Chart dimensions are computed once from the container size; resizing is not tracked.
//! - One instrument, one series; history is navigated by frame index only.

pub mod chart;

pub mod prelude;
mod utils;

pub use chart::{
    BandScale, BarAttrs, BarElement, ChartConfig, ChartDimensions, ChartError, ColorScale,
    Frame, KeyedDiff, LabelElement, LevelCategory, LinearScale, ManualTickScheduler, Margin,
    OrderBookChart, OrderEntry, OrderKey, PlaybackController, PlaybackState, PlaybackTick,
    RenderSummary, RenderSync, ScaleEngine, Scales, Scene, SceneLayers, ScheduledTick, Side,
    SnapshotRecord, TextAnchor, TickScheduler, TokioTickScheduler, keyed_diff, level_ordering,
    load_records, normalize_record, normalize_records, records_from_json, records_from_values,
    render_svg,
};
pub use utils::{current_time_millis, format_grouped, nan_safe_max};

/// Depth chart driven by a Tokio interval task.
pub type TokioOrderBookChart = OrderBookChart<TokioTickScheduler>;
