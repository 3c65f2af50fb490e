//! Order book depth chart: normalization, scales, scene reconciliation and playback.

/// The chart component tying frames, scene and playback together.
pub mod book_chart;
pub mod config;
/// Keyed enter/update/exit diffing.
pub mod diff;
pub mod error;
/// Snapshot normalization into frames.
pub mod frame;
/// Vertical category ordering.
pub mod levels;
/// Playback state machine and tick schedulers.
pub mod playback;
pub mod record;
pub mod render;
pub mod scales;
pub mod scene;
/// SVG output of a scene.
pub mod svg;

pub use book_chart::OrderBookChart;
pub use config::{ChartConfig, ChartDimensions, Margin};
pub use diff::{KeyedDiff, keyed_diff};
pub use error::ChartError;
pub use frame::{Frame, OrderEntry, OrderKey, Side, normalize_record, normalize_records};
pub use levels::{LevelCategory, level_ordering};
pub use playback::{
    ManualTickScheduler, PlaybackController, PlaybackState, PlaybackTick, ScheduledTick,
    TickScheduler, TokioTickScheduler,
};
pub use record::{SnapshotRecord, load_records, records_from_json, records_from_values};
pub use render::{RenderSummary, RenderSync};
pub use scales::{BandScale, ColorScale, LinearScale, ScaleEngine, Scales};
pub use scene::{BarAttrs, BarElement, LabelElement, Scene, SceneLayers, TextAnchor};
pub use svg::render_svg;
