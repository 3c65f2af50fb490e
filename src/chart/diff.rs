//! Keyed enter/update/exit reconciliation, independent of any drawing backend.

use std::collections::HashSet;
use std::hash::Hash;

/// Three disjoint key sets describing how a rendered collection must change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedDiff<K> {
    /// Keys only in the new data: elements to create
    pub enter: Vec<K>,
    /// Keys in both: elements to transition
    pub update: Vec<K>,
    /// Keys only in the previous render: elements to remove
    pub exit: Vec<K>,
}

impl<K> KeyedDiff<K> {
    /// `true` when nothing is created or removed.
    pub fn is_stable(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty()
    }
}

/// Splits `current` against `previous`.
///
/// `enter` and `update` follow the order of `current`, `exit` the order of
/// `previous`. Duplicate keys collapse to their first occurrence.
pub fn keyed_diff<K, P, C>(previous: P, current: C) -> KeyedDiff<K>
where
    K: Eq + Hash + Clone,
    P: IntoIterator<Item = K>,
    C: IntoIterator<Item = K>,
{
    let mut previous_seen = HashSet::new();
    let previous: Vec<K> = previous
        .into_iter()
        .filter(|key| previous_seen.insert(key.clone()))
        .collect();

    let mut current_seen = HashSet::new();
    let mut enter = Vec::new();
    let mut update = Vec::new();
    for key in current {
        if !current_seen.insert(key.clone()) {
            continue;
        }
        if previous_seen.contains(&key) {
            update.push(key);
        } else {
            enter.push(key);
        }
    }

    let exit = previous
        .into_iter()
        .filter(|key| !current_seen.contains(key))
        .collect();

    KeyedDiff {
        enter,
        update,
        exit,
    }
}
