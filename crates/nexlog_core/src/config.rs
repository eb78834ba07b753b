//! Timeline configuration.
//!
//! # Invariants
//! - Every field has a default; partial JSON documents are accepted.
//! - Configured page sizes are clamped into `1..=PAGE_SIZE_MAX`.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};

const PAGE_SIZE_DEFAULT: usize = 5;
const PAGE_SIZE_MAX: usize = 50;
const TRAILING_WINDOW_DAYS_DEFAULT: u32 = 7;
const LOAD_BATCH_SIZE_DEFAULT: usize = 7;

/// Host-supplied settings for one timeline instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Logs per page in the single-day view.
    pub page_size: usize,
    /// Lookback for the "logs this week" style metric.
    pub trailing_window_days: u32,
    /// Day groups fetched per load-more request.
    pub load_batch_size: usize,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` leaves logging off.
    pub log_dir: Option<String>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE_DEFAULT,
            trailing_window_days: TRAILING_WINDOW_DAYS_DEFAULT,
            load_batch_size: LOAD_BATCH_SIZE_DEFAULT,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl TimelineConfig {
    /// Parses a JSON document, filling missing fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Page size actually used by default-sized page requests.
    pub fn effective_page_size(&self) -> usize {
        normalize_page_size(Some(self.page_size))
    }

    pub fn effective_load_batch_size(&self) -> usize {
        self.load_batch_size.max(1)
    }
}

/// Clamps a configured page size; `None` and `0` fall back to the default.
pub fn normalize_page_size(page_size: Option<usize>) -> usize {
    match page_size {
        None | Some(0) => PAGE_SIZE_DEFAULT,
        Some(value) => value.min(PAGE_SIZE_MAX),
    }
}
