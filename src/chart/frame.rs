//! Normalized order book frames derived from flat snapshot records.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, trace};

use super::record::SnapshotRecord;

/// Side of the book an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy side
    Bid,
    /// Sell side
    Ask,
}

impl Side {
    /// Lowercase name used in category keys (`bid`, `ask`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Bid => "bid",
            Side::Ask => "ask",
        }
    }

    /// Prefix of the record fields for this side (`Bid`, `Ask`).
    pub fn field_prefix(&self) -> &'static str {
        match self {
            Side::Bid => "Bid",
            Side::Ask => "Ask",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of an entry across frames: one per `(side, level)` pair.
pub type OrderKey = (Side, u32);

/// One level of one side of the book at a point in time.
///
/// `price` and `size` are `NaN` when the record lacked the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderEntry {
    /// Level price
    pub price: f64,
    /// Resting size at the level
    pub size: f64,
    /// Book side
    pub side: Side,
    /// Rank within the side, 1 = nearest to touch
    pub level: u32,
}

impl OrderEntry {
    /// The `(side, level)` identity key.
    pub fn key(&self) -> OrderKey {
        (self.side, self.level)
    }

    /// Size as a drawable magnitude: non-finite sizes count as zero.
    pub fn extent(&self) -> f64 {
        if self.size.is_finite() { self.size } else { 0.0 }
    }
}

/// The full normalized book at one timestamp. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Timestamp text copied from the record
    pub time: String,
    /// Exactly two entries per configured level
    pub orders: Vec<OrderEntry>,
}

impl Frame {
    /// Finds the entry for a `(side, level)` pair.
    pub fn order(&self, side: Side, level: u32) -> Option<&OrderEntry> {
        self.orders
            .iter()
            .find(|order| order.side == side && order.level == level)
    }

    /// Identity keys of every entry, in entry order.
    pub fn keys(&self) -> impl Iterator<Item = OrderKey> + '_ {
        self.orders.iter().map(OrderEntry::key)
    }
}

/// Builds one frame from one record, reading `levels` levels per side.
///
/// Entries are emitted as `Bid1, Ask1, Bid2, Ask2, ...`. Consumers must only
/// rely on the `(side, level)` key, not on this order.
pub fn normalize_record(record: &SnapshotRecord, levels: u32) -> Frame {
    let mut orders = Vec::with_capacity(levels as usize * 2);
    for level in 1..=levels {
        for side in [Side::Bid, Side::Ask] {
            let prefix = side.field_prefix();
            orders.push(OrderEntry {
                price: record.number(&format!("{prefix}{level}")),
                size: record.number(&format!("{prefix}{level}Size")),
                side,
                level,
            });
        }
    }

    let frame = Frame {
        time: record.time(),
        orders,
    };
    trace!("normalized frame at {:?}: {} entries", frame.time, frame.orders.len());
    frame
}

/// Builds one frame per record, in input order.
pub fn normalize_records(records: &[SnapshotRecord], levels: u32) -> Vec<Frame> {
    let frames: Vec<Frame> = records
        .iter()
        .map(|record| normalize_record(record, levels))
        .collect();
    info!(
        "normalized {} records into frames with {} levels per side",
        frames.len(),
        levels
    );
    frames
}
