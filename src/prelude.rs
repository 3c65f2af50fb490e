/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Prelude module that re-exports commonly used types and traits.
//!
//! ```rust
//! use depth_chart_rs::prelude::*;
//! ```

// Chart component
pub use crate::chart::{ChartConfig, ChartDimensions, ChartError, Margin, OrderBookChart};

// Input and frames
pub use crate::chart::{
    Frame, OrderEntry, OrderKey, Side, SnapshotRecord, load_records, normalize_records,
    records_from_json,
};

// Scales and scene
pub use crate::chart::{
    LevelCategory, RenderSummary, RenderSync, ScaleEngine, Scales, Scene, SceneLayers,
    level_ordering, render_svg,
};

// Playback
pub use crate::chart::{
    ManualTickScheduler, PlaybackController, PlaybackState, PlaybackTick, ScheduledTick,
    TickScheduler, TokioTickScheduler,
};

pub use crate::TokioOrderBookChart;

// Utility functions
pub use crate::utils::current_time_millis;
