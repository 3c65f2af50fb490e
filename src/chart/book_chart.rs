/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! The depth chart component: frames, scene, scales and playback in one place.

use std::ops::RangeInclusive;
use tracing::{debug, info};

use super::config::{ChartConfig, ChartDimensions};
use super::error::ChartError;
use super::frame::{Frame, normalize_records};
use super::levels::level_ordering;
use super::playback::{
    ManualTickScheduler, PlaybackController, PlaybackState, PlaybackTick, TickScheduler,
};
use super::record::SnapshotRecord;
use super::render::{RenderSummary, RenderSync};
use super::scales::{ScaleEngine, Scales};
use super::scene::Scene;
use super::svg::render_svg;
use crate::utils::current_time_millis;

/// An animated order book depth chart.
///
/// The chart owns every piece of mutable state: the normalized frames, the
/// current index (through its [`PlaybackController`]), the scales of the
/// current frame and the persistent [`Scene`]. Methods ending in `_at` take
/// an explicit scene time in milliseconds; the others use the wall clock.
///
/// # Examples
/// ```
/// use depth_chart_rs::{ChartConfig, OrderBookChart, records_from_json};
///
/// let config = ChartConfig { levels: 1, ..ChartConfig::default() };
/// let mut chart = OrderBookChart::manual(config, 800.0, 400.0).unwrap();
/// let records = records_from_json(
///     r#"[{"Time": "09:30:00", "Bid1": 100.01, "Bid1Size": 500, "Ask1": 100.02, "Ask1Size": 300}]"#,
/// ).unwrap();
///
/// chart.load_at(&records, 0);
/// assert_eq!(chart.current_time(), "09:30:00");
/// assert_eq!(chart.scales().unwrap().x.domain(), [-500.0, 500.0]);
/// ```
#[derive(Debug)]
pub struct OrderBookChart<S: TickScheduler = ManualTickScheduler> {
    config: ChartConfig,
    frames: Vec<Frame>,
    current_time: String,
    scene: Scene,
    scales: Option<Scales>,
    playback: PlaybackController<S>,
}

impl OrderBookChart<ManualTickScheduler> {
    /// Creates a chart whose ticks are fed by hand.
    pub fn manual(
        config: ChartConfig,
        container_width: f64,
        container_height: f64,
    ) -> Result<Self, ChartError> {
        Self::new(
            config,
            container_width,
            container_height,
            ManualTickScheduler::new(),
        )
    }
}

impl<S: TickScheduler> OrderBookChart<S> {
    /// Validates `config` and lays out an empty scene inside the container.
    ///
    /// The plot area is fixed here; later container resizes are not followed.
    pub fn new(
        config: ChartConfig,
        container_width: f64,
        container_height: f64,
        scheduler: S,
    ) -> Result<Self, ChartError> {
        config.validate()?;
        let dimensions =
            ChartDimensions::from_container(container_width, container_height, config.margin);
        info!(
            "initialized depth chart: plot {}x{}, {} levels per side",
            dimensions.width, dimensions.height, config.levels
        );

        Ok(Self {
            scene: Scene::new(dimensions, &config),
            playback: PlaybackController::new(scheduler, config.playback_interval()),
            frames: Vec::new(),
            current_time: String::new(),
            scales: None,
            config,
        })
    }

    /// Replaces all frames with `records` and redraws.
    ///
    /// Loading no records empties the scene and stops playback.
    pub fn load(&mut self, records: &[SnapshotRecord]) -> Option<RenderSummary> {
        self.load_at(records, current_time_millis())
    }

    /// [`load`](Self::load) at an explicit scene time.
    pub fn load_at(&mut self, records: &[SnapshotRecord], now_ms: u64) -> Option<RenderSummary> {
        self.frames = normalize_records(records, self.config.levels);
        self.playback.set_frame_count(self.frames.len());
        info!("loaded {} frames", self.frames.len());
        if self.frames.is_empty() {
            self.scene.clear();
            self.current_time.clear();
            self.scales = None;
            return None;
        }
        self.update_at(now_ms)
    }

    /// Redraws the current frame. A no-op returning `None` without frames.
    pub fn update(&mut self) -> Option<RenderSummary> {
        self.update_at(current_time_millis())
    }

    /// [`update`](Self::update) at an explicit scene time.
    pub fn update_at(&mut self, now_ms: u64) -> Option<RenderSummary> {
        let frame = self.frames.get(self.playback.current_index())?;
        self.current_time = frame.time.clone();

        let categories = level_ordering(&frame.orders);
        let scales = ScaleEngine::compute(
            &frame.orders,
            &categories,
            &self.scene.dimensions,
            &self.config,
        );
        let summary = RenderSync::sync(&mut self.scene, frame, &scales, &self.config, now_ms);
        self.scales = Some(scales);
        Some(summary)
    }

    /// Starts autoplay. Returns `false` when already running or without frames.
    pub fn start_animation(&mut self) -> bool {
        self.playback.start()
    }

    /// Stops autoplay. Returns `false` when already stopped.
    pub fn stop_animation(&mut self) -> bool {
        self.playback.stop()
    }

    /// Play/pause button. Returns the new state.
    pub fn toggle_animation(&mut self) -> PlaybackState {
        self.playback.toggle()
    }

    /// Scrubs to `index`, halting autoplay, and redraws.
    pub fn seek(&mut self, index: usize) -> Option<RenderSummary> {
        self.seek_at(index, current_time_millis())
    }

    /// [`seek`](Self::seek) at an explicit scene time.
    pub fn seek_at(&mut self, index: usize, now_ms: u64) -> Option<RenderSummary> {
        self.playback.seek(index);
        self.update_at(now_ms)
    }

    /// Applies a playback tick and redraws when it advanced the index.
    pub fn handle_tick(&mut self, tick: PlaybackTick) -> Option<RenderSummary> {
        self.handle_tick_at(tick, current_time_millis())
    }

    /// [`handle_tick`](Self::handle_tick) at an explicit scene time.
    pub fn handle_tick_at(&mut self, tick: PlaybackTick, now_ms: u64) -> Option<RenderSummary> {
        let index = self.playback.on_tick(tick)?;
        debug!("tick advanced to frame {}", index);
        self.update_at(now_ms)
    }

    /// Normalized frames in input order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The frame on display, if any.
    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames.get(self.playback.current_index())
    }

    /// Index of the frame on display.
    pub fn current_index(&self) -> usize {
        self.playback.current_index()
    }

    /// Timestamp of the last drawn frame.
    pub fn current_time(&self) -> &str {
        &self.current_time
    }

    /// Whether autoplay is running.
    pub fn is_animating(&self) -> bool {
        self.playback.is_running()
    }

    /// Range for a scrub control, `None` without frames.
    pub fn slider_range(&self) -> Option<RangeInclusive<usize>> {
        self.playback.slider_range()
    }

    /// The persistent scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Scales of the last drawn frame.
    pub fn scales(&self) -> Option<&Scales> {
        self.scales.as_ref()
    }

    /// Active configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Plot geometry.
    pub fn dimensions(&self) -> &ChartDimensions {
        &self.scene.dimensions
    }

    /// The playback controller.
    pub fn playback(&self) -> &PlaybackController<S> {
        &self.playback
    }

    /// Mutable access to the tick scheduler.
    ///
    /// The playback frame count is not reachable from here; it always
    /// follows the loaded frames.
    pub fn scheduler_mut(&mut self) -> &mut S {
        self.playback.scheduler_mut()
    }

    /// The scene as an SVG document, bars sampled at `now_ms`.
    pub fn to_svg(&self, now_ms: u64) -> String {
        render_svg(&self.scene, now_ms)
    }
}
