//! Shared helpers for the demo binaries.

use depth_chart_rs::{ChartError, SnapshotRecord, records_from_values};
use serde_json::{Map, Value, json};
use tracing::Level;

/// Installs a plain `tracing` formatter at the level named by `LOGLEVEL` (default `INFO`).
pub fn setup_logger() {
    let level = std::env::var("LOGLEVEL")
        .ok()
        .and_then(|value| value.parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
}

/// A small synthetic session: sizes drift from one snapshot to the next.
pub fn sample_records(count: usize, levels: u32) -> Result<Vec<SnapshotRecord>, ChartError> {
    let values = (0..count).map(|i| {
        let mut row = Map::new();
        row.insert(
            "Time".to_string(),
            json!(format!("09:30:{:02}", i % 60)),
        );
        for level in 1..=levels {
            let step = f64::from(level) * 0.01;
            let wobble = ((i as u32 * 7 + level * 13) % 17) * 25;
            row.insert(format!("Bid{level}"), json!(100.0 - step));
            row.insert(format!("Bid{level}Size"), json!(200 + level * 50 + wobble));
            row.insert(format!("Ask{level}"), json!(100.0 + step));
            row.insert(format!("Ask{level}Size"), json!(180 + level * 60 + wobble));
        }
        Value::Object(row)
    });
    records_from_values(values)
}
