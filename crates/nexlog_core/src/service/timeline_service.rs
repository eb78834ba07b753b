//! Timeline use-case service.
//!
//! # Responsibility
//! - Expose every presentation-facing operation of the engine.
//! - Keep the date index and running metrics in step with store mutations.
//! - Own the incremental loader's window and in-flight request.
//!
//! # Invariants
//! - Derived views are updated inside the same `&mut self` call as the
//!   mutation that invalidates them, so readers never observe a partial update.
//! - Failed mutations leave store, index and metrics untouched.
//! - At most one load request is honored; newer requests and date jumps
//!   supersede older ones.

use crate::clock::{Clock, SystemClock};
use crate::config::TimelineConfig;
use crate::index::DateIndex;
use crate::loader::{
    GroupSource, LoadBatch, LoadCursor, LoadGate, LoadOutcome, LoadRequest, LoadTicket,
};
use crate::metrics::{window_start, Metrics, MetricsAggregator};
use crate::model::day::DayKey;
use crate::model::log::{
    Comment, CommentAuthor, CommentId, Log, LogId, NewLogEntry, ValidationError,
};
use crate::model::person::{Person, PersonDirectory, PersonId, Role};
use crate::query::jump::{resolve_jump, JumpTarget};
use crate::query::page::{paginate, Page};
use crate::query::search::search_people;
use crate::repo::log_repo::{InMemoryLogRepository, LogRepository, RepoError};
use crate::service::thread_service::{total_unread, ThreadService};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// Malformed input; the caller may correct and retry.
    Validation(ValidationError),
    LogNotFound(LogId),
    CommentNotFound {
        log_id: LogId,
        comment_id: CommentId,
    },
    /// The async retrieval hook failed.
    Retrieval(String),
}

impl Display for TimelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::LogNotFound(id) => write!(f, "log not found: {id}"),
            Self::CommentNotFound { log_id, comment_id } => {
                write!(f, "comment {comment_id} not found on log {log_id}")
            }
            Self::Retrieval(message) => write!(f, "group retrieval failed: {message}"),
        }
    }
}

impl Error for TimelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for TimelineError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for TimelineError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::LogNotFound(id) => Self::LogNotFound(id),
            RepoError::CommentNotFound { log_id, comment_id } => {
                Self::CommentNotFound { log_id, comment_id }
            }
        }
    }
}

pub type TimelineResult<T> = Result<T, TimelineError>;

/// Day-grouped snapshot of the whole timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedTimeline {
    /// Day keys, most recent first.
    pub ordered_keys: Vec<DayKey>,
    pub groups: HashMap<DayKey, Vec<Log>>,
}

/// Engine facade over one entity store.
pub struct TimelineService<R: LogRepository = InMemoryLogRepository, C: Clock = SystemClock> {
    repo: R,
    index: DateIndex,
    metrics: MetricsAggregator,
    directory: PersonDirectory,
    clock: C,
    config: TimelineConfig,
    cursor: LoadCursor,
    gate: LoadGate,
    in_flight: Option<u64>,
}

impl TimelineService {
    /// Empty in-memory timeline on the system clock with default config.
    pub fn in_memory(directory: PersonDirectory) -> Self {
        Self::new(
            InMemoryLogRepository::new(),
            directory,
            SystemClock,
            TimelineConfig::default(),
        )
    }
}

impl<R: LogRepository, C: Clock> TimelineService<R, C> {
    /// Wraps an existing store, deriving the index and totals from its contents.
    pub fn new(repo: R, directory: PersonDirectory, clock: C, config: TimelineConfig) -> Self {
        let index = DateIndex::rebuild(repo.logs());
        let metrics = MetricsAggregator::from_logs(repo.logs());
        Self {
            repo,
            index,
            metrics,
            directory,
            clock,
            config,
            cursor: LoadCursor::default(),
            gate: LoadGate::new(),
            in_flight: None,
        }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn directory(&self) -> &PersonDirectory {
        &self.directory
    }

    /// Records a new log for `author_id` on `date`.
    ///
    /// A blank `link` is stored as no link.
    pub fn submit_log(
        &mut self,
        author_id: PersonId,
        date: DayKey,
        content: &str,
        link: Option<&str>,
    ) -> TimelineResult<Log> {
        let author = self.directory.find(author_id).ok_or_else(|| {
            warn!("event=log_rejected module=timeline reason=unknown_author author_id={author_id}");
            ValidationError::UnknownAuthor(author_id)
        })?;
        let entry = NewLogEntry::new(author, date, content, link.map(str::to_string));

        let log = self.repo.create_log(&entry).inspect_err(|err| {
            warn!("event=log_rejected module=timeline author_id={author_id} reason={err}");
        })?;
        let new_day = self.index.insert(&log);
        self.metrics.record_log();

        info!(
            "event=log_submitted module=timeline log_id={} author_id={} day={} new_day={}",
            log.id, log.author_id, log.date, new_day
        );
        Ok(log)
    }

    /// Appends a comment to an existing log.
    pub fn post_comment(
        &mut self,
        log_id: LogId,
        author: CommentAuthor,
        content: &str,
    ) -> TimelineResult<Comment> {
        let comment = ThreadService::new(&mut self.repo).post_comment(log_id, author, content)?;
        self.metrics.record_comment();

        info!(
            "event=comment_posted module=timeline log_id={} comment_id={} author_role={:?} is_read={}",
            log_id, comment.id, comment.author.role, comment.is_read
        );
        Ok(comment)
    }

    /// Marks one comment read. Repeating the call is a no-op.
    pub fn mark_comment_read(
        &mut self,
        log_id: LogId,
        comment_id: CommentId,
    ) -> TimelineResult<()> {
        ThreadService::new(&mut self.repo).mark_read(log_id, comment_id)?;
        Ok(())
    }

    /// Marks every comment `viewer` sees as new on one log; returns how many changed.
    pub fn mark_thread_read(&mut self, log_id: LogId, viewer: Role) -> TimelineResult<usize> {
        let changed = ThreadService::new(&mut self.repo).mark_thread_read(log_id, viewer)?;
        debug!("event=thread_read module=timeline log_id={log_id} changed={changed}");
        Ok(changed)
    }

    pub fn get_log(&self, log_id: LogId) -> TimelineResult<&Log> {
        self.repo
            .get_log(log_id)
            .ok_or(TimelineError::LogNotFound(log_id))
    }

    pub fn unread_count_for(&self, log_id: LogId, viewer: Role) -> TimelineResult<usize> {
        Ok(self.get_log(log_id)?.unread_count_for(viewer))
    }

    /// Unread comments addressed to `viewer` across the whole store.
    pub fn total_unread(&self, viewer: Role) -> usize {
        total_unread(self.repo.logs(), viewer)
    }

    /// Full day-grouped view, most recent day first.
    pub fn grouped_timeline(&self) -> GroupedTimeline {
        let groups = self
            .index
            .ordered_keys()
            .iter()
            .map(|day| {
                let logs: Vec<Log> = self.logs_on(*day).into_iter().cloned().collect();
                (*day, logs)
            })
            .collect();
        GroupedTimeline {
            ordered_keys: self.index.ordered_keys().to_vec(),
            groups,
        }
    }

    /// Day keys, most recent first.
    pub fn ordered_keys(&self) -> &[DayKey] {
        self.index.ordered_keys()
    }

    /// Logs recorded on `day` in submission order.
    pub fn logs_on(&self, day: DayKey) -> Vec<&Log> {
        self.index
            .group(day)
            .iter()
            .filter_map(|id| self.repo.get_log(*id))
            .collect()
    }

    /// Logs written by one person, most recent day first.
    pub fn logs_by_author(&self, author_id: PersonId) -> Vec<&Log> {
        self.index
            .ordered_keys()
            .iter()
            .flat_map(|day| self.logs_on(*day))
            .filter(|log| log.author_id == author_id)
            .collect()
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot(
            &self.index,
            self.clock.today(),
            self.config.trailing_window_days,
        )
    }

    /// Logs dated within `days` of today, inclusive.
    pub fn logs_in_trailing_window(&self, days: u32) -> usize {
        self.index.count_since(window_start(self.clock.today(), days))
    }

    /// Autocomplete over the person directory; blank queries suggest nothing.
    pub fn search_people(&self, query: &str) -> Vec<Person> {
        search_people(query, self.directory.people())
    }

    /// Resolves `date` to its own group or the nearest earlier one.
    ///
    /// Supersedes any in-flight load and widens the visible window so the
    /// resolved group is on screen.
    pub fn jump_to_date(&mut self, date: DayKey) -> Option<JumpTarget> {
        self.cancel_load();
        let target = resolve_jump(date, self.index.ordered_keys())?;
        self.cursor.extend_to(target.key());
        debug!(
            "event=date_jump module=timeline target={} resolved={} exact={}",
            date,
            target.key(),
            matches!(target, JumpTarget::Exact(_))
        );
        Some(target)
    }

    /// One page of the logs recorded on `day`.
    pub fn get_page(
        &self,
        day: DayKey,
        page_number: usize,
        page_size: usize,
    ) -> TimelineResult<Page<Log>> {
        let logs: Vec<Log> = self.logs_on(day).into_iter().cloned().collect();
        Ok(paginate(&logs, page_size, page_number)?)
    }

    /// Same as [`Self::get_page`] with the configured page size.
    pub fn get_default_page(&self, day: DayKey, page_number: usize) -> TimelineResult<Page<Log>> {
        self.get_page(day, page_number, self.config.effective_page_size())
    }

    /// Day keys delivered to the presentation layer so far.
    pub fn visible_keys(&self) -> &[DayKey] {
        let keys = self.index.ordered_keys();
        &keys[..self.cursor.loaded_len(keys)]
    }

    /// Handle for superseding loads from outside the service.
    pub fn load_gate(&self) -> LoadGate {
        self.gate.clone()
    }

    /// Reserves the next batch of older day keys.
    ///
    /// Any request already in flight is superseded.
    pub fn begin_load_more(&mut self, batch_size: usize) -> TimelineResult<LoadRequest> {
        match self.cursor.next_batch(self.index.ordered_keys(), batch_size)? {
            LoadBatch::Exhausted => {
                debug!("event=load_exhausted module=loader");
                Ok(LoadRequest::Exhausted)
            }
            LoadBatch::Keys(keys) => {
                let generation = self.gate.issue();
                self.in_flight = Some(generation);
                debug!(
                    "event=load_started module=loader generation={} keys={}",
                    generation,
                    keys.len()
                );
                Ok(LoadRequest::Pending(LoadTicket::new(generation, keys)))
            }
        }
    }

    /// Applies a finished request unless something newer replaced it.
    pub fn complete_load(&mut self, ticket: LoadTicket) -> LoadOutcome {
        let generation = ticket.generation();
        if self.in_flight != Some(generation) || !self.gate.is_current(generation) {
            debug!("event=load_dropped module=loader generation={generation}");
            return LoadOutcome::Superseded;
        }

        self.in_flight = None;
        let start = self.cursor.loaded_len(self.index.ordered_keys());
        if let Some(oldest) = ticket.keys().last() {
            self.cursor.extend_to(*oldest);
        }
        // Days recorded while the ticket was out may fall inside its range.
        let keys = self.visible_keys()[start..].to_vec();
        debug!(
            "event=load_applied module=loader generation={} keys={}",
            generation,
            keys.len()
        );
        LoadOutcome::Loaded(keys)
    }

    /// Drops the in-flight request, if any.
    pub fn cancel_load(&mut self) {
        if self.in_flight.take().is_some() {
            self.gate.supersede();
            debug!("event=load_cancelled module=loader");
        }
    }

    /// Fetches and applies the next batch of day groups through `source`.
    ///
    /// Resolves to `Superseded` when the gate moves on while `source` is
    /// still working; the fetched batch is then discarded.
    pub async fn load_more_groups<S: GroupSource>(
        &mut self,
        batch_size: usize,
        source: &S,
    ) -> TimelineResult<LoadOutcome> {
        let ticket = match self.begin_load_more(batch_size)? {
            LoadRequest::Exhausted => return Ok(LoadOutcome::Exhausted),
            LoadRequest::Pending(ticket) => ticket,
        };

        let gate = self.gate.clone();
        let fetched = gate
            .run(ticket.generation(), source.fetch_groups(ticket.keys()))
            .await;
        match fetched {
            None => {
                if self.in_flight == Some(ticket.generation()) {
                    self.in_flight = None;
                }
                debug!(
                    "event=load_dropped module=loader generation={}",
                    ticket.generation()
                );
                Ok(LoadOutcome::Superseded)
            }
            Some(Err(err)) => {
                self.in_flight = None;
                warn!(
                    "event=load_failed module=loader generation={} reason={}",
                    ticket.generation(),
                    err
                );
                Err(err)
            }
            Some(Ok(())) => Ok(self.complete_load(ticket)),
        }
    }
}
