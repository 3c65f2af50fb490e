//! Chart configuration and layout dimensions.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use super::error::ChartError;
use super::scene::SceneLayers;

/// Default number of levels per side in each snapshot record.
pub const DEFAULT_LEVELS: u32 = 10;

/// Default playback tick interval in milliseconds.
pub const DEFAULT_PLAYBACK_INTERVAL_MS: u64 = 1000;

/// Default bar transition duration in milliseconds.
pub const DEFAULT_TRANSITION_DURATION_MS: u64 = 300;

/// Space reserved around the plotting area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    /// Space above the plot (holds the side titles)
    pub top: f64,
    /// Space to the right of the plot
    pub right: f64,
    /// Space below the plot (holds the x axis)
    pub bottom: f64,
    /// Space to the left of the plot (holds the price axis)
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 30.0,
            bottom: 40.0,
            left: 80.0,
        }
    }
}

/// Tunable parameters of the depth chart.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use depth_chart_rs::ChartConfig;
///
/// let config = ChartConfig::from_json(r#"{ "levels": 5, "bid_color": "green" }"#).unwrap();
/// assert_eq!(config.levels, 5);
/// assert_eq!(config.playback_interval_ms, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Number of levels per side read from each record (`Bid1..BidK`, `Ask1..AskK`)
    pub levels: u32,
    /// Interval between playback ticks
    pub playback_interval_ms: u64,
    /// Duration of bar transitions
    pub transition_duration_ms: u64,
    /// Fill color for bid bars
    pub bid_color: String,
    /// Fill color for ask bars
    pub ask_color: String,
    /// Margins around the plot area
    pub margin: Margin,
    /// Font family for every text element
    pub font_family: String,
    /// Font weight for every text element
    pub font_weight: String,
    /// Font size for axis tick labels
    pub axis_tick_font_size: String,
    /// Font size for the size labels next to the center line
    pub size_label_font_size: String,
    /// Horizontal distance between the center line and the size labels
    pub bar_label_center_offset: f64,
    /// Inner and outer padding of the price bands, as a fraction of the step
    pub band_padding: f64,
    /// Approximate number of ticks on the size axis
    pub x_tick_count: usize,
    /// Stroke color of the center reference line
    pub center_line_color: String,
    /// Layers drawn on each redraw
    pub layers: SceneLayers,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS,
            playback_interval_ms: DEFAULT_PLAYBACK_INTERVAL_MS,
            transition_duration_ms: DEFAULT_TRANSITION_DURATION_MS,
            bid_color: "#83b27d".to_string(),
            ask_color: "#c76e5b".to_string(),
            margin: Margin::default(),
            font_family: r#"Roboto, "Helvetica Neue", sans-serif"#.to_string(),
            font_weight: "lighter".to_string(),
            axis_tick_font_size: "12px".to_string(),
            size_label_font_size: "12px".to_string(),
            bar_label_center_offset: 10.0,
            band_padding: 0.1,
            x_tick_count: 10,
            center_line_color: "#333".to_string(),
            layers: SceneLayers::all(),
        }
    }
}

impl ChartConfig {
    /// Parses a configuration from JSON and validates it.
    pub fn from_json(data: &str) -> Result<Self, ChartError> {
        let config: ChartConfig = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ChartError> {
        let problem = if self.levels == 0 {
            Some("levels must be at least 1".to_string())
        } else if self.playback_interval_ms == 0 {
            Some("playback_interval_ms must be positive".to_string())
        } else if !(0.0..1.0).contains(&self.band_padding) {
            Some(format!(
                "band_padding must be in [0, 1), got {}",
                self.band_padding
            ))
        } else if !self.bar_label_center_offset.is_finite() {
            Some("bar_label_center_offset must be finite".to_string())
        } else {
            None
        };

        match problem {
            Some(message) => {
                warn!("rejected chart configuration: {}", message);
                Err(ChartError::InvalidConfig { message })
            }
            None => Ok(()),
        }
    }

    /// Playback interval as a [`Duration`].
    pub fn playback_interval(&self) -> Duration {
        Duration::from_millis(self.playback_interval_ms)
    }
}

/// Pixel geometry of the chart, computed once from the container size.
///
/// The plot area is the container minus the margins. Resizing the container
/// afterwards is not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDimensions {
    /// Full container width
    pub outer_width: f64,
    /// Full container height
    pub outer_height: f64,
    /// Plot area width
    pub width: f64,
    /// Plot area height
    pub height: f64,
    /// Margins used to derive the plot area
    pub margin: Margin,
}

impl ChartDimensions {
    /// Derives the plot area from the container size; negative results clamp to zero.
    pub fn from_container(outer_width: f64, outer_height: f64, margin: Margin) -> Self {
        Self {
            outer_width,
            outer_height,
            width: (outer_width - margin.left - margin.right).max(0.0),
            height: (outer_height - margin.top - margin.bottom).max(0.0),
            margin,
        }
    }
}
