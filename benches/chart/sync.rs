use criterion::{BenchmarkId, Criterion};
use depth_chart_rs::{ChartConfig, OrderBookChart};
use std::hint::black_box;

use crate::records::snapshot_records;

/// Register all benchmarks for redrawing and playback.
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Chart - Sync");

    for &levels in &[5u32, 10, 25] {
        let records = snapshot_records(200, levels);
        let config = ChartConfig {
            levels,
            ..ChartConfig::default()
        };

        group.bench_with_input(
            BenchmarkId::new("load_at", levels),
            &records,
            |b, records| {
                b.iter_with_setup(
                    || OrderBookChart::manual(config.clone(), 1000.0, 600.0),
                    |chart| {
                        if let Ok(mut chart) = chart {
                            black_box(chart.load_at(records, 0));
                        }
                    },
                );
            },
        );

        group.bench_with_input(
            BenchmarkId::new("tick_redraw", levels),
            &records,
            |b, records| {
                let Ok(mut chart) = OrderBookChart::manual(config.clone(), 1000.0, 600.0) else {
                    return;
                };
                chart.load_at(records, 0);
                chart.start_animation();
                let mut now = 0u64;
                b.iter(|| {
                    now += 1000;
                    if let Some(tick) = chart.playback().scheduler().next_tick() {
                        black_box(chart.handle_tick_at(tick, now));
                    }
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("to_svg", levels),
            &records,
            |b, records| {
                let Ok(mut chart) = OrderBookChart::manual(config.clone(), 1000.0, 600.0) else {
                    return;
                };
                chart.load_at(records, 0);
                b.iter(|| black_box(chart.to_svg(150)));
            },
        );
    }

    group.finish();
}
