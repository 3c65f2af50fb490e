//! Autoplays a synthetic session on a Tokio interval and logs every redraw.

use demos::{sample_records, setup_logger};
use depth_chart_rs::prelude::*;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    setup_logger();

    let records = match sample_records(8, 5) {
        Ok(records) => records,
        Err(e) => {
            error!("could not build sample: {}", e);
            return;
        }
    };

    let config = ChartConfig {
        levels: 5,
        playback_interval_ms: 250,
        ..ChartConfig::default()
    };
    let (scheduler, mut ticks) = TokioTickScheduler::new(tokio::runtime::Handle::current());
    let mut chart: TokioOrderBookChart = match OrderBookChart::new(config, 800.0, 400.0, scheduler)
    {
        Ok(chart) => chart,
        Err(e) => {
            error!("invalid chart configuration: {}", e);
            return;
        }
    };

    chart.load(&records);
    chart.start_animation();

    // Two full loops, then a scrub back to the start
    let loops = chart.frames().len() * 2;
    for _ in 0..loops {
        let Some(tick) = ticks.recv().await else {
            break;
        };
        if let Some(summary) = chart.handle_tick(tick) {
            info!(
                "frame {} at {}: {} bars updated, max size {:?}",
                chart.current_index(),
                chart.current_time(),
                summary.bars.update.len(),
                chart.scales().map(|s| s.x.domain()[1])
            );
        }
    }

    chart.seek(0);
    info!(
        "scrubbed to {} (animating: {})",
        chart.current_time(),
        chart.is_animating()
    );
}
