//! Incremental loading of older day groups.
//!
//! # Responsibility
//! - Hand out the next batch of day keys after the last delivered one.
//! - Gate async retrieval so that only the newest request is honored.
//!
//! # Invariants
//! - Batches are consecutive slices of the descending key sequence; no key is
//!   delivered twice.
//! - `Exhausted` is reported only once every key has been delivered.
//! - A superseded request never applies its batch.

use crate::model::day::DayKey;
use crate::model::log::ValidationError;
use crate::service::timeline_service::TimelineError;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Result of asking for more keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "keys")]
pub enum LoadBatch {
    /// Up to `batch_size` keys following the loaded prefix.
    Keys(Vec<DayKey>),
    /// Nothing left to deliver.
    Exhausted,
}

/// Returns up to `batch_size` keys after the first `already_loaded` ones.
///
/// # Errors
/// - `ValidationError::InvalidBatchSize` when `batch_size == 0`.
pub fn load_more(
    ordered_keys: &[DayKey],
    already_loaded: usize,
    batch_size: usize,
) -> Result<LoadBatch, ValidationError> {
    if batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize);
    }
    if already_loaded >= ordered_keys.len() {
        return Ok(LoadBatch::Exhausted);
    }

    let end = already_loaded.saturating_add(batch_size).min(ordered_keys.len());
    Ok(LoadBatch::Keys(ordered_keys[already_loaded..end].to_vec()))
}

/// Position of the loaded window inside the key sequence.
///
/// Tracked as the oldest delivered key rather than a count, so keys inserted
/// ahead of the window never shift an older key back into the next batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadCursor {
    oldest_delivered: Option<DayKey>,
}

impl LoadCursor {
    /// Number of keys in `ordered_keys` inside the loaded window.
    pub fn loaded_len(&self, ordered_keys: &[DayKey]) -> usize {
        match self.oldest_delivered {
            Some(oldest) => ordered_keys.partition_point(|key| *key >= oldest),
            None => 0,
        }
    }

    pub fn next_batch(
        &self,
        ordered_keys: &[DayKey],
        batch_size: usize,
    ) -> Result<LoadBatch, ValidationError> {
        load_more(ordered_keys, self.loaded_len(ordered_keys), batch_size)
    }

    /// Widens the window down to `day`; never narrows it.
    pub fn extend_to(&mut self, day: DayKey) {
        self.oldest_delivered = Some(match self.oldest_delivered {
            Some(current) => current.min(day),
            None => day,
        });
    }

    pub fn oldest_delivered(&self) -> Option<DayKey> {
        self.oldest_delivered
    }
}

/// Keys reserved by an in-flight load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    keys: Vec<DayKey>,
}

impl LoadTicket {
    pub(crate) fn new(generation: u64, keys: Vec<DayKey>) -> Self {
        Self { generation, keys }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn keys(&self) -> &[DayKey] {
        &self.keys
    }
}

/// Start of a load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    Pending(LoadTicket),
    Exhausted,
}

/// How a load request ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "keys")]
pub enum LoadOutcome {
    /// The batch was applied to the visible window.
    Loaded(Vec<DayKey>),
    /// Every key had already been delivered.
    Exhausted,
    /// A newer request or a date jump replaced this one; nothing was applied.
    Superseded,
}

/// Generation counter shared between the timeline and whoever awaits retrieval.
///
/// Issuing a new generation supersedes every older one.
#[derive(Debug, Clone)]
pub struct LoadGate {
    generation: Arc<watch::Sender<u64>>,
}

impl Default for LoadGate {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadGate {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(0);
        Self {
            generation: Arc::new(sender),
        }
    }

    /// Starts a new generation and returns it.
    pub(crate) fn issue(&self) -> u64 {
        self.generation.send_modify(|generation| *generation += 1);
        *self.generation.borrow()
    }

    /// Cancels whatever is in flight without starting a new request.
    pub fn supersede(&self) {
        self.generation.send_modify(|generation| *generation += 1);
    }

    pub fn current(&self) -> u64 {
        *self.generation.borrow()
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }

    /// Drives `work` until it finishes or `generation` is superseded.
    ///
    /// Returns `None` when superseded; `work` is dropped at that point.
    pub async fn run<F: Future>(&self, generation: u64, work: F) -> Option<F::Output> {
        let mut receiver = self.generation.subscribe();
        tokio::select! {
            biased;
            _ = wait_until_superseded(&mut receiver, generation) => None,
            output = work => Some(output),
        }
    }
}

async fn wait_until_superseded(receiver: &mut watch::Receiver<u64>, generation: u64) {
    loop {
        if *receiver.borrow_and_update() != generation {
            return;
        }
        if receiver.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Async data-retrieval hook awaited before a batch is applied.
pub trait GroupSource {
    /// Fetches whatever backs the day groups in `keys`.
    fn fetch_groups(
        &self,
        keys: &[DayKey],
    ) -> impl Future<Output = Result<(), TimelineError>> + Send;
}
