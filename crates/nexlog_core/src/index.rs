//! Date index over the entity store.
//!
//! # Responsibility
//! - Partition logs by calendar day.
//! - Keep the day keys sorted most-recent first.
//!
//! # Invariants
//! - `ordered_keys` is strictly descending.
//! - A key is present iff its group is non-empty.
//! - Logs within a group keep store insertion order.
//! - Incremental inserts yield the same key order as a full rebuild.

use crate::model::day::DayKey;
use crate::model::log::{Log, LogId};
use std::collections::HashMap;

/// Derived day-grouped view of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateIndex {
    groups: HashMap<DayKey, Vec<LogId>>,
    ordered_keys: Vec<DayKey>,
}

impl DateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from scratch in one pass over `logs`.
    pub fn rebuild(logs: &[Log]) -> Self {
        let mut groups: HashMap<DayKey, Vec<LogId>> = HashMap::new();
        for log in logs {
            groups.entry(log.date).or_default().push(log.id);
        }

        let mut ordered_keys: Vec<DayKey> = groups.keys().copied().collect();
        ordered_keys.sort_unstable_by(|a, b| b.cmp(a));

        Self {
            groups,
            ordered_keys,
        }
    }

    /// Adds one log, binary-inserting its key when the day is new.
    ///
    /// Returns `true` when a new day key was introduced.
    pub fn insert(&mut self, log: &Log) -> bool {
        let group = self.groups.entry(log.date).or_default();
        group.push(log.id);
        if group.len() > 1 {
            return false;
        }

        let position = self.key_position(log.date);
        self.ordered_keys.insert(position, log.date);
        true
    }

    /// Removes one log from its group, dropping the key once the group empties.
    ///
    /// Returns `false` when the log was not indexed under `date`.
    pub fn remove(&mut self, log_id: LogId, date: DayKey) -> bool {
        let Some(group) = self.groups.get_mut(&date) else {
            return false;
        };
        let Some(offset) = group.iter().position(|id| *id == log_id) else {
            return false;
        };
        group.remove(offset);

        if group.is_empty() {
            self.groups.remove(&date);
            let position = self.key_position(date);
            if self.ordered_keys.get(position) == Some(&date) {
                self.ordered_keys.remove(position);
            }
        }
        true
    }

    /// Day keys, most recent first.
    pub fn ordered_keys(&self) -> &[DayKey] {
        &self.ordered_keys
    }

    /// Log ids recorded on `day` in insertion order; empty for unknown days.
    pub fn group(&self, day: DayKey) -> &[LogId] {
        self.groups.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, day: DayKey) -> bool {
        self.groups.contains_key(&day)
    }

    /// Total number of indexed logs across all groups.
    pub fn total_logs(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Counts logs dated on or after `cutoff`.
    ///
    /// Keys are descending, so the qualifying days form a prefix.
    pub fn count_since(&self, cutoff: DayKey) -> usize {
        let end = self.ordered_keys.partition_point(|key| *key >= cutoff);
        self.ordered_keys[..end]
            .iter()
            .map(|key| self.group(*key).len())
            .sum()
    }

    /// First position whose key is not newer than `day`.
    fn key_position(&self, day: DayKey) -> usize {
        self.ordered_keys.partition_point(|key| *key > day)
    }
}
