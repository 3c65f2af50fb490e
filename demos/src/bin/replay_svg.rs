//! Replays a snapshot file frame by frame and writes each frame as an SVG.
//!
//! Usage: `replay_svg [records.json] [out_dir]`. Without a file a synthetic
//! session is used.

use demos::{sample_records, setup_logger};
use depth_chart_rs::prelude::*;
use std::path::PathBuf;
use tracing::{error, info};

fn main() {
    setup_logger();

    let mut args = std::env::args().skip(1);
    let records = match args.next() {
        Some(path) => load_records(&path),
        None => sample_records(5, 10),
    };
    let records = match records {
        Ok(records) => records,
        Err(e) => {
            error!("could not read snapshots: {}", e);
            return;
        }
    };
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "depth-frames".to_string()));
    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        error!("could not create {}: {}", out_dir.display(), e);
        return;
    }

    let config = ChartConfig::default();
    let transition = config.transition_duration_ms;
    let mut chart = match OrderBookChart::manual(config, 1000.0, 600.0) {
        Ok(chart) => chart,
        Err(e) => {
            error!("invalid chart configuration: {}", e);
            return;
        }
    };

    let mut now = 0u64;
    chart.load_at(&records, now);
    for index in 0..chart.frames().len() {
        if index > 0 {
            now += 1000;
            chart.seek_at(index, now);
        }
        let path = out_dir.join(format!("frame_{index:04}.svg"));
        match std::fs::write(&path, chart.to_svg(now + transition)) {
            Ok(()) => info!("{} -> {}", chart.current_time(), path.display()),
            Err(e) => error!("could not write {}: {}", path.display(), e),
        }
    }
}
