//! Frame-to-scene reconciliation.
//!
//! [`RenderSync::sync`] brings a [`Scene`] in line with one [`Frame`]: keyed
//! bars and labels go through enter/update/exit, axes and the center line are
//! redrawn from scratch. It is the only code that mutates a scene after
//! creation.

use tracing::debug;

use super::config::ChartConfig;
use super::diff::{KeyedDiff, keyed_diff};
use super::frame::{Frame, OrderEntry, OrderKey, Side};
use super::levels::LevelCategory;
use super::scales::Scales;
use super::scene::{
    AxisTick, BarAttrs, BarElement, CenterLine, LabelElement, Scene, SceneLayers, TextAnchor,
};
use crate::utils::{format_abs, format_fixed, format_grouped};

/// Decimals shown on price axis ticks.
pub const PRICE_DECIMALS: usize = 4;

/// What a sync changed, per keyed layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    /// Bar reconciliation
    pub bars: KeyedDiff<OrderKey>,
    /// Label reconciliation
    pub labels: KeyedDiff<OrderKey>,
}

/// Reconciles a scene against a frame.
pub struct RenderSync;

impl RenderSync {
    /// Updates `scene` to show `frame` under `scales`, starting transitions at `now_ms`.
    ///
    /// Calling it again with the same frame and scales leaves the same final
    /// geometry and the same set of elements.
    pub fn sync(
        scene: &mut Scene,
        frame: &Frame,
        scales: &Scales,
        config: &ChartConfig,
        now_ms: u64,
    ) -> RenderSummary {
        let layers = config.layers;
        scene.settle(now_ms);

        if layers.contains(SceneLayers::Y_AXIS) {
            scene.y_axis = Self::price_ticks(frame, scales);
        } else {
            scene.y_axis.clear();
        }

        if layers.contains(SceneLayers::X_AXIS) {
            scene.x_axis = scales
                .x
                .ticks(config.x_tick_count)
                .into_iter()
                .map(|value| AxisTick {
                    position: scales.x.apply(value),
                    label: format_abs(value),
                })
                .collect();
        } else {
            scene.x_axis.clear();
        }

        scene.center_line = layers.contains(SceneLayers::CENTER_LINE).then(|| CenterLine {
            x: scales.x.apply(0.0),
            y1: 0.0,
            y2: scene.dimensions.height,
        });

        let bars = if layers.contains(SceneLayers::BARS) {
            Self::sync_bars(scene, frame, scales, config, now_ms)
        } else {
            let exit = scene.bars.keys().copied().collect();
            scene.bars.clear();
            KeyedDiff {
                enter: Vec::new(),
                update: Vec::new(),
                exit,
            }
        };

        let labels = if layers.contains(SceneLayers::LABELS) {
            Self::sync_labels(scene, frame, scales, config)
        } else {
            let exit = scene.labels.keys().copied().collect();
            scene.labels.clear();
            KeyedDiff {
                enter: Vec::new(),
                update: Vec::new(),
                exit,
            }
        };

        debug!(
            "synced frame {:?}: bars +{} ~{} -{}, labels +{} ~{} -{}",
            frame.time,
            bars.enter.len(),
            bars.update.len(),
            bars.exit.len(),
            labels.enter.len(),
            labels.update.len(),
            labels.exit.len()
        );

        RenderSummary { bars, labels }
    }

    /// One tick per band, labeled with the price of the matching entry.
    fn price_ticks(frame: &Frame, scales: &Scales) -> Vec<AxisTick> {
        scales
            .y
            .domain()
            .iter()
            .filter_map(|category| {
                let position = scales.y.center(category)?;
                let label = frame
                    .order(category.side, category.level)
                    .map(|order| format_fixed(order.price, PRICE_DECIMALS))
                    .unwrap_or_default();
                Some(AxisTick { position, label })
            })
            .collect()
    }

    /// Final geometry of the bar for an entry.
    fn bar_target(order: &OrderEntry, scales: &Scales) -> BarAttrs {
        let (x, width) = scales.bar_span(order);
        BarAttrs {
            x,
            y: scales.y.apply(&LevelCategory::of(order)).unwrap_or(0.0),
            width,
            height: scales.y.bandwidth(),
        }
    }

    fn sync_bars(
        scene: &mut Scene,
        frame: &Frame,
        scales: &Scales,
        config: &ChartConfig,
        now_ms: u64,
    ) -> KeyedDiff<OrderKey> {
        let diff = keyed_diff(scene.bars.keys().copied(), frame.keys());
        let duration = config.transition_duration_ms;

        for key in &diff.exit {
            scene.bars.remove(key);
        }

        for key in &diff.update {
            let (Some(order), Some(bar)) = (frame.order(key.0, key.1), scene.bars.get_mut(key))
            else {
                continue;
            };
            bar.fill = scales.color.apply(order.side).to_string();
            bar.transition_to(Self::bar_target(order, scales), now_ms, duration);
        }

        let origin = scales.x.apply(0.0);
        for key in &diff.enter {
            let Some(order) = frame.order(key.0, key.1) else {
                continue;
            };
            let target = Self::bar_target(order, scales);
            let mut bar = BarElement {
                key: *key,
                fill: scales.color.apply(order.side).to_string(),
                attrs: BarAttrs {
                    x: origin,
                    width: 0.0,
                    ..target
                },
                transition: None,
            };
            bar.transition_to(target, now_ms, duration);
            scene.bars.insert(*key, bar);
        }

        diff
    }

    fn sync_labels(
        scene: &mut Scene,
        frame: &Frame,
        scales: &Scales,
        config: &ChartConfig,
    ) -> KeyedDiff<OrderKey> {
        let diff = keyed_diff(scene.labels.keys().copied(), frame.keys());

        for key in &diff.exit {
            scene.labels.remove(key);
        }

        let origin = scales.x.apply(0.0);
        let offset = config.bar_label_center_offset;
        for key in diff.update.iter().chain(diff.enter.iter()) {
            let Some(order) = frame.order(key.0, key.1) else {
                continue;
            };
            let (x, anchor) = match order.side {
                Side::Bid => (origin - offset, TextAnchor::End),
                Side::Ask => (origin + offset, TextAnchor::Start),
            };
            let y = scales
                .y
                .center(&LevelCategory::of(order))
                .unwrap_or(0.0);
            scene.labels.insert(
                *key,
                LabelElement {
                    key: *key,
                    x,
                    y,
                    text: format_grouped(order.size),
                    anchor,
                },
            );
        }

        diff
    }
}
