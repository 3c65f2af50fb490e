//! Vertical axis ordering of `(side, level)` categories.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::frame::{OrderEntry, OrderKey, Side};

/// A band on the vertical axis, displayed as `"<side>-<level>"` (e.g. `ask-3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelCategory {
    /// Book side
    pub side: Side,
    /// Level within the side
    pub level: u32,
}

impl LevelCategory {
    /// Creates a category.
    pub fn new(side: Side, level: u32) -> Self {
        Self { side, level }
    }

    /// The category of an order entry.
    pub fn of(order: &OrderEntry) -> Self {
        Self::new(order.side, order.level)
    }

    /// The matching identity key.
    pub fn key(&self) -> OrderKey {
        (self.side, self.level)
    }
}

/// Asks form one block above bids; within a side levels ascend.
impl Ord for LevelCategory {
    fn cmp(&self, other: &Self) -> Ordering {
        let block = |side: Side| match side {
            Side::Ask => 0u8,
            Side::Bid => 1u8,
        };
        block(self.side)
            .cmp(&block(other.side))
            .then(self.level.cmp(&other.level))
    }
}

impl PartialOrd for LevelCategory {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for LevelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.side, self.level)
    }
}

/// Error returned when a category string is not `bid-N` or `ask-N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelCategoryError {
    /// The rejected input
    pub input: String,
}

impl fmt::Display for ParseLevelCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid level category: {:?}", self.input)
    }
}

impl std::error::Error for ParseLevelCategoryError {}

impl FromStr for LevelCategory {
    type Err = ParseLevelCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLevelCategoryError {
            input: s.to_string(),
        };
        let (side, level) = s.split_once('-').ok_or_else(err)?;
        let side = match side {
            "bid" => Side::Bid,
            "ask" => Side::Ask,
            _ => return Err(err()),
        };
        let level = level.parse::<u32>().map_err(|_| err())?;
        Ok(Self::new(side, level))
    }
}

/// Distinct categories present in `orders`, asks first, then bids, levels ascending.
///
/// Ordering is by level number, never by price: malformed feeds where prices
/// are not monotonic in level keep their level order.
pub fn level_ordering(orders: &[OrderEntry]) -> Vec<LevelCategory> {
    orders
        .iter()
        .map(LevelCategory::of)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
