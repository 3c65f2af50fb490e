//! Value-to-pixel mappings recomputed for every frame.
//!
//! Scales are plain values: computing them has no side effects, and applying
//! them is a pure function of the input.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::config::{ChartConfig, ChartDimensions};
use super::frame::{OrderEntry, Side};
use super::levels::LevelCategory;
use crate::utils::nan_safe_max;

/// Continuous linear mapping from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    /// Creates a scale mapping `domain` onto `range`.
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Symmetric domain `[-magnitude, magnitude]` mapped onto `[0, width]`.
    pub fn symmetric(magnitude: f64, width: f64) -> Self {
        Self::new([-magnitude, magnitude], [0.0, width])
    }

    /// The input domain.
    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    /// The output range.
    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Maps a domain value to a pixel position.
    ///
    /// A degenerate domain maps every value to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 {
            0.5
        } else {
            (value - d0) / span
        };
        r0 + (r1 - r0) * t
    }

    /// Roughly `count` evenly spaced round values covering the domain.
    ///
    /// Steps are 1, 2 or 5 times a power of ten.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let [mut start, mut stop] = self.domain;
        if !start.is_finite() || !stop.is_finite() || count == 0 {
            return Vec::new();
        }
        if start == stop {
            return vec![start];
        }
        let reverse = stop < start;
        if reverse {
            std::mem::swap(&mut start, &mut stop);
        }

        let Some((i1, i2, increment)) = tick_spec(start, stop, count as f64) else {
            return Vec::new();
        };
        if i2 < i1 {
            return Vec::new();
        }

        let mut ticks: Vec<f64> = (i1..=i2)
            .map(|i| {
                let i = i as f64;
                if increment < 0.0 {
                    i / -increment
                } else {
                    i * increment
                }
            })
            .collect();
        if reverse {
            ticks.reverse();
        }
        ticks
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count.max(1.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, increment);
    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        i1 = (start * inc).round();
        i2 = (stop * inc).round();
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        increment = -inc;
    } else {
        let inc = 10f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        increment = inc;
    }

    if !i1.is_finite() || !i2.is_finite() || !increment.is_finite() {
        return None;
    }
    Some((i1 as i64, i2 as i64, increment))
}

/// Categorical mapping onto evenly sized, padded bands of a pixel range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: Vec<LevelCategory>,
    range: [f64; 2],
    padding: f64,
    step: f64,
    first: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Lays `domain` out over `range` with equal inner and outer `padding`, centered.
    pub fn new(domain: Vec<LevelCategory>, range: [f64; 2], padding: f64) -> Self {
        let [start, stop] = range;
        let n = domain.len() as f64;
        let step = (stop - start) / (n - padding + padding * 2.0).max(1.0);
        let first = start + (stop - start - step * (n - padding)) * 0.5;
        let bandwidth = step * (1.0 - padding);

        Self {
            domain,
            range,
            padding,
            step,
            first,
            bandwidth,
        }
    }

    /// Start of the band for a category, or `None` when it is not in the domain.
    pub fn apply(&self, category: &LevelCategory) -> Option<f64> {
        self.domain
            .iter()
            .position(|candidate| candidate == category)
            .map(|i| self.first + self.step * i as f64)
    }

    /// Middle of the band for a category.
    pub fn center(&self, category: &LevelCategory) -> Option<f64> {
        self.apply(category).map(|start| start + self.bandwidth / 2.0)
    }

    /// Height of every band.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Padding fraction.
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Categories in display order.
    pub fn domain(&self) -> &[LevelCategory] {
        &self.domain
    }

    /// The output range.
    pub fn range(&self) -> [f64; 2] {
        self.range
    }
}

/// Fixed side-to-color mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScale {
    bid: String,
    ask: String,
}

impl ColorScale {
    /// Creates the mapping.
    pub fn new(bid: impl Into<String>, ask: impl Into<String>) -> Self {
        Self {
            bid: bid.into(),
            ask: ask.into(),
        }
    }

    /// Color for a side.
    pub fn apply(&self, side: Side) -> &str {
        match side {
            Side::Bid => &self.bid,
            Side::Ask => &self.ask,
        }
    }
}

/// All mappings needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    /// Signed size to horizontal position; bids negative, asks positive
    pub x: LinearScale,
    /// Category to band start
    pub y: BandScale,
    /// Side to fill color
    pub color: ColorScale,
}

impl Scales {
    /// Horizontal span `(x, width)` of the bar for an entry.
    ///
    /// Bids span `[x(-size), x(0)]`, asks `[x(0), x(size)]`; non-finite sizes
    /// collapse to zero width at the origin.
    ///
    /// Negative finite sizes are not clamped and yield a negative width, with
    /// `x` still computed as above. Consumers decide how to draw them;
    /// [`render_svg`](super::svg::render_svg) writes such bars with zero width.
    pub fn bar_span(&self, order: &OrderEntry) -> (f64, f64) {
        let origin = self.x.apply(0.0);
        let size = order.extent();
        match order.side {
            Side::Bid => {
                let left = self.x.apply(-size);
                (left, origin - left)
            }
            Side::Ask => (origin, self.x.apply(size) - origin),
        }
    }
}

/// Derives [`Scales`] from the current frame.
pub struct ScaleEngine;

impl ScaleEngine {
    /// Computes the scales for a frame's entries and their category order.
    pub fn compute(
        orders: &[OrderEntry],
        categories: &[LevelCategory],
        dimensions: &ChartDimensions,
        config: &ChartConfig,
    ) -> Scales {
        let max_size = nan_safe_max(orders.iter().map(|order| order.size)).unwrap_or(0.0);
        trace!(
            "scales: max_size {}, {} categories over {}x{}",
            max_size,
            categories.len(),
            dimensions.width,
            dimensions.height
        );

        Scales {
            x: LinearScale::symmetric(max_size, dimensions.width),
            y: BandScale::new(
                categories.to_vec(),
                [0.0, dimensions.height],
                config.band_padding,
            ),
            color: ColorScale::new(config.bid_color.clone(), config.ask_color.clone()),
        }
    }
}
