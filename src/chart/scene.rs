//! Persistent scene state: keyed bars and labels, axes, and static decorations.
//!
//! The scene is a plain data model. It is created once from the container
//! geometry, mutated only by [`RenderSync`](super::render::RenderSync), and
//! can be sampled at any instant to read the in-flight transition values.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::config::{ChartConfig, ChartDimensions};
use super::frame::OrderKey;

bitflags! {
    /// Layers drawn on each redraw.
    ///
    /// # Examples
    /// ```
    /// use depth_chart_rs::SceneLayers;
    ///
    /// // Bars only, no labels or axes
    /// let layers = SceneLayers::BARS;
    ///
    /// // Everything
    /// let layers = SceneLayers::all();
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SceneLayers: u8 {
        /// Size bars
        const BARS = 1 << 0;

        /// Size labels beside the center line
        const LABELS = 1 << 1;

        /// Size axis along the bottom
        const X_AXIS = 1 << 2;

        /// Price axis along the left
        const Y_AXIS = 1 << 3;

        /// Vertical reference line at zero size
        const CENTER_LINE = 1 << 4;
    }
}

impl Default for SceneLayers {
    fn default() -> Self {
        SceneLayers::all()
    }
}

/// Geometry of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BarAttrs {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl BarAttrs {
    /// Linear interpolation between two geometries, `t` in `[0, 1]`.
    pub fn lerp(&self, to: &BarAttrs, t: f64) -> BarAttrs {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        BarAttrs {
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            width: mix(self.width, to.width),
            height: mix(self.height, to.height),
        }
    }
}

/// Cubic ease-in-out, the default easing of bar transitions.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// An animation from one geometry to another over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Geometry at `start_ms`
    pub from: BarAttrs,
    /// Geometry once the transition has finished
    pub to: BarAttrs,
    /// Scene time when the transition began
    pub start_ms: u64,
    /// Length of the transition
    pub duration_ms: u64,
}

impl Transition {
    /// Geometry at `now_ms`; before the start it is `from`, after the end it is `to`.
    pub fn sample(&self, now_ms: u64) -> BarAttrs {
        if self.duration_ms == 0 || now_ms >= self.end_ms() {
            return self.to;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms) as f64;
        let t = ease_cubic_in_out(elapsed / self.duration_ms as f64);
        self.from.lerp(&self.to, t)
    }

    /// Scene time when the transition completes.
    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }

    /// Whether the transition has completed at `now_ms`.
    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms >= self.end_ms()
    }
}

/// A size bar bound to one `(side, level)` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarElement {
    /// Identity key
    pub key: OrderKey,
    /// Fill color
    pub fill: String,
    /// Geometry when no transition is running
    pub attrs: BarAttrs,
    /// Running transition, if any
    pub transition: Option<Transition>,
}

impl BarElement {
    /// Geometry as displayed at `now_ms`.
    pub fn attrs_at(&self, now_ms: u64) -> BarAttrs {
        match &self.transition {
            Some(transition) => transition.sample(now_ms),
            None => self.attrs,
        }
    }

    /// Geometry the bar ends up at once animation completes.
    pub fn target(&self) -> BarAttrs {
        match &self.transition {
            Some(transition) => transition.to,
            None => self.attrs,
        }
    }

    /// Starts a transition from the currently displayed geometry to `to`.
    pub fn transition_to(&mut self, to: BarAttrs, now_ms: u64, duration_ms: u64) {
        let from = self.attrs_at(now_ms);
        self.attrs = from;
        self.transition = Some(Transition {
            from,
            to,
            start_ms: now_ms,
            duration_ms,
        });
    }

    /// Folds a completed transition into `attrs`.
    pub fn settle(&mut self, now_ms: u64) {
        if let Some(transition) = self.transition {
            if transition.is_finished(now_ms) {
                self.attrs = transition.to;
                self.transition = None;
            }
        }
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    /// Text starts at the anchor
    Start,
    /// Text is centered on the anchor
    Middle,
    /// Text ends at the anchor
    End,
}

impl TextAnchor {
    /// SVG `text-anchor` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// A size label bound to one `(side, level)` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelElement {
    /// Identity key
    pub key: OrderKey,
    /// Anchor x
    pub x: f64,
    /// Anchor y (vertical middle of the band)
    pub y: f64,
    /// Formatted size
    pub text: String,
    /// Alignment: bids end at the anchor, asks start there
    pub anchor: TextAnchor,
}

/// One tick on an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    /// Offset along the axis
    pub position: f64,
    /// Tick label
    pub label: String,
}

/// Vertical reference line through zero size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterLine {
    /// Horizontal position
    pub x: f64,
    /// Top end
    pub y1: f64,
    /// Bottom end
    pub y2: f64,
}

/// Fixed text placed once at initialization (axis titles, side titles).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticText {
    /// Role of the text: `x-label`, `y-label` or `top-label`
    pub class: String,
    /// Displayed text
    pub text: String,
    /// Anchor x (in the rotated frame when `rotation` is set)
    pub x: f64,
    /// Anchor y (in the rotated frame when `rotation` is set)
    pub y: f64,
    /// Rotation in degrees
    pub rotation: Option<f64>,
}

/// Font and stroke settings copied from the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneStyle {
    /// Font family of every text element
    pub font_family: String,
    /// Font weight of every text element
    pub font_weight: String,
    /// Font size of axis ticks
    pub axis_tick_font_size: String,
    /// Font size of bar labels
    pub size_label_font_size: String,
    /// Stroke color of the center line
    pub center_line_color: String,
}

impl From<&ChartConfig> for SceneStyle {
    fn from(config: &ChartConfig) -> Self {
        Self {
            font_family: config.font_family.clone(),
            font_weight: config.font_weight.clone(),
            axis_tick_font_size: config.axis_tick_font_size.clone(),
            size_label_font_size: config.size_label_font_size.clone(),
            center_line_color: config.center_line_color.clone(),
        }
    }
}

/// The complete drawable state of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Container and plot geometry, fixed at creation
    pub dimensions: ChartDimensions,
    /// Text styling
    pub style: SceneStyle,
    /// Size bars by key
    pub bars: BTreeMap<OrderKey, BarElement>,
    /// Size labels by key
    pub labels: BTreeMap<OrderKey, LabelElement>,
    /// Ticks of the size axis
    pub x_axis: Vec<AxisTick>,
    /// Ticks of the price axis
    pub y_axis: Vec<AxisTick>,
    /// Zero reference line, once drawn
    pub center_line: Option<CenterLine>,
    /// Titles placed at creation
    pub titles: Vec<StaticText>,
}

impl Scene {
    /// Creates an empty scene with its axis and side titles placed.
    pub fn new(dimensions: ChartDimensions, config: &ChartConfig) -> Self {
        let width = dimensions.width;
        let height = dimensions.height;
        let title = |class: &str, text: &str, x: f64, y: f64, rotation: Option<f64>| StaticText {
            class: class.to_string(),
            text: text.to_string(),
            x,
            y,
            rotation,
        };

        let titles = vec![
            title(
                "x-label",
                "Size",
                width / 2.0,
                height + dimensions.margin.bottom - 5.0,
                None,
            ),
            title("y-label", "Price", -height / 2.0, -(width / 18.0), Some(-90.0)),
            title("top-label", "Bids", width / 4.0, -5.0, None),
            title("top-label", "Asks", width - width / 4.0, -5.0, None),
        ];

        Self {
            dimensions,
            style: SceneStyle::from(config),
            bars: BTreeMap::new(),
            labels: BTreeMap::new(),
            x_axis: Vec::new(),
            y_axis: Vec::new(),
            center_line: None,
            titles,
        }
    }

    /// Folds every finished transition into its bar's resting geometry.
    pub fn settle(&mut self, now_ms: u64) {
        for bar in self.bars.values_mut() {
            bar.settle(now_ms);
        }
    }

    /// Whether any bar is still moving at `now_ms`.
    pub fn is_animating(&self, now_ms: u64) -> bool {
        self.bars.values().any(|bar| {
            bar.transition
                .is_some_and(|transition| !transition.is_finished(now_ms))
        })
    }

    /// Removes every keyed element and axis tick, keeping the titles.
    pub fn clear(&mut self) {
        self.bars.clear();
        self.labels.clear();
        self.x_axis.clear();
        self.y_axis.clear();
        self.center_line = None;
    }
}
