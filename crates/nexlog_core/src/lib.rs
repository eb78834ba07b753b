//! Log aggregation and engagement-state engine for the NexLog timeline.
//! This crate is the single source of truth for timeline invariants; the
//! presentation layer only calls into it.

pub mod clock;
pub mod config;
pub mod index;
pub mod loader;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{normalize_page_size, TimelineConfig};
pub use index::DateIndex;
pub use loader::{
    load_more, GroupSource, LoadBatch, LoadCursor, LoadGate, LoadOutcome, LoadRequest, LoadTicket,
};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use metrics::{compute_metrics, logs_in_trailing_window, Metrics, MetricsAggregator};
pub use model::day::{day_key_of, parse_day_key, DayKey};
pub use model::log::{
    Comment, CommentAuthor, CommentId, Log, LogId, NewLogEntry, ValidationError,
};
pub use model::person::{Person, PersonDirectory, PersonId, Role};
pub use query::jump::{resolve_jump, JumpTarget};
pub use query::page::{paginate, Page};
pub use query::search::{search_people, Autocomplete};
pub use repo::log_repo::{
    InMemoryLogRepository, LogRepository, ReadTransition, RepoError, RepoResult,
};
pub use service::thread_service::{total_unread, unread_count_for, ThreadService};
pub use service::timeline_service::{
    GroupedTimeline, TimelineError, TimelineResult, TimelineService,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
