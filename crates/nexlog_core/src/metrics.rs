//! Engagement metrics over the current log set.
//!
//! # Responsibility
//! - Compute totals, the average thread size and trailing-window activity.
//! - Keep running totals up to date from mutation deltas.
//!
//! # Invariants
//! - Output depends only on the log set and `today`, never on iteration order.
//! - The average is `0` for an empty store and is rounded to two decimals.
//! - Window comparisons are by calendar day, inclusive of the boundary day.

use crate::index::DateIndex;
use crate::model::day::DayKey;
use crate::model::log::Log;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Derived engagement statistics. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_logs: usize,
    pub total_comments: usize,
    pub average_comments_per_log: f64,
    pub logs_in_trailing_window: usize,
    pub trailing_window_days: u32,
}

/// Computes metrics from scratch.
pub fn compute_metrics(logs: &[Log], today: DayKey, window_days: u32) -> Metrics {
    let total_logs = logs.len();
    let total_comments = logs.iter().map(|log| log.comments.len()).sum();
    Metrics {
        total_logs,
        total_comments,
        average_comments_per_log: average_comments(total_comments, total_logs),
        logs_in_trailing_window: logs_in_trailing_window(logs, today, window_days),
        trailing_window_days: window_days,
    }
}

/// Counts logs dated on or after `today - days`.
pub fn logs_in_trailing_window(logs: &[Log], today: DayKey, days: u32) -> usize {
    let cutoff = window_start(today, days);
    logs.iter().filter(|log| log.date >= cutoff).count()
}

/// First day included in a trailing window of `days` ending at `today`.
pub fn window_start(today: DayKey, days: u32) -> DayKey {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

fn average_comments(total_comments: usize, total_logs: usize) -> f64 {
    if total_logs == 0 {
        return 0.0;
    }
    let raw = total_comments as f64 / total_logs as f64;
    (raw * 100.0).round() / 100.0
}

/// Running totals maintained from store deltas.
///
/// The trailing-window count is read from the date index at snapshot time,
/// since it moves with `today` rather than with mutations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsAggregator {
    total_logs: usize,
    total_comments: usize,
}

impl MetricsAggregator {
    pub fn from_logs(logs: &[Log]) -> Self {
        Self {
            total_logs: logs.len(),
            total_comments: logs.iter().map(|log| log.comments.len()).sum(),
        }
    }

    pub fn record_log(&mut self) {
        self.total_logs += 1;
    }

    pub fn record_comment(&mut self) {
        self.total_comments += 1;
    }

    pub fn snapshot(&self, index: &DateIndex, today: DayKey, window_days: u32) -> Metrics {
        Metrics {
            total_logs: self.total_logs,
            total_comments: self.total_comments,
            average_comments_per_log: average_comments(self.total_comments, self.total_logs),
            logs_in_trailing_window: index.count_since(window_start(today, window_days)),
            trailing_window_days: window_days,
        }
    }
}
