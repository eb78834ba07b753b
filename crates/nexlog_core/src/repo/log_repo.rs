//! Log repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Assign fresh log ids and append logs in submission order.
//! - Append comments and apply read-state transitions.
//!
//! # Invariants
//! - Log ids are unique and never reused.
//! - Comment ids follow insertion order within their log.
//! - A comment authored by the log owner's role starts read.

use crate::model::log::{
    normalize_link, Comment, CommentAuthor, CommentId, Log, LogId, NewLogEntry, ValidationError,
};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level error for log and comment mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(ValidationError),
    LogNotFound(LogId),
    CommentNotFound {
        log_id: LogId,
        comment_id: CommentId,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::LogNotFound(id) => write!(f, "log not found: {id}"),
            Self::CommentNotFound { log_id, comment_id } => {
                write!(f, "comment {comment_id} not found on log {log_id}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::LogNotFound(_) | Self::CommentNotFound { .. } => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Read-state change produced by a mark-read request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadTransition {
    /// The comment moved from unread to read.
    MarkedRead,
    /// The comment was already read; nothing changed.
    AlreadyRead,
}

/// Repository interface for the entity store.
pub trait LogRepository {
    /// Validates and appends one log, returning the stored record.
    fn create_log(&mut self, entry: &NewLogEntry) -> RepoResult<Log>;
    fn get_log(&self, id: LogId) -> Option<&Log>;
    /// All logs in submission order.
    fn logs(&self) -> &[Log];
    /// Appends a comment to an existing log.
    fn append_comment(
        &mut self,
        log_id: LogId,
        author: CommentAuthor,
        content: &str,
    ) -> RepoResult<Comment>;
    /// Applies the `Unread -> Read` transition; repeated calls are no-ops.
    fn mark_comment_read(
        &mut self,
        log_id: LogId,
        comment_id: CommentId,
    ) -> RepoResult<ReadTransition>;
}

/// In-memory entity store with id-indexed lookup.
#[derive(Debug, Default)]
pub struct InMemoryLogRepository {
    logs: Vec<Log>,
    positions: HashMap<LogId, usize>,
    next_id: LogId,
}

impl InMemoryLogRepository {
    pub fn new() -> Self {
        Self {
            logs: Vec::new(),
            positions: HashMap::new(),
            next_id: 1,
        }
    }

    fn log_mut(&mut self, id: LogId) -> RepoResult<&mut Log> {
        let position = *self.positions.get(&id).ok_or(RepoError::LogNotFound(id))?;
        Ok(&mut self.logs[position])
    }
}

impl LogRepository for InMemoryLogRepository {
    fn create_log(&mut self, entry: &NewLogEntry) -> RepoResult<Log> {
        entry.validate()?;
        let link = normalize_link(entry.link.as_deref())?;

        let id = self.next_id.max(1);
        let log = Log {
            id,
            date: entry.date,
            author_id: entry.author_id,
            author_role: entry.author_role,
            content: entry.content.clone(),
            link,
            comments: Vec::new(),
        };

        self.next_id = id + 1;
        self.positions.insert(id, self.logs.len());
        self.logs.push(log.clone());
        Ok(log)
    }

    fn get_log(&self, id: LogId) -> Option<&Log> {
        self.positions.get(&id).map(|position| &self.logs[*position])
    }

    fn logs(&self) -> &[Log] {
        &self.logs
    }

    fn append_comment(
        &mut self,
        log_id: LogId,
        author: CommentAuthor,
        content: &str,
    ) -> RepoResult<Comment> {
        let log = self.log_mut(log_id)?;
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyComment.into());
        }

        let comment = Comment {
            id: log.next_comment_id(),
            is_read: author.role == log.author_role,
            author,
            content: content.to_string(),
        };
        log.comments.push(comment.clone());
        Ok(comment)
    }

    fn mark_comment_read(
        &mut self,
        log_id: LogId,
        comment_id: CommentId,
    ) -> RepoResult<ReadTransition> {
        let log = self.log_mut(log_id)?;
        let comment = log
            .comments
            .iter_mut()
            .find(|comment| comment.id == comment_id)
            .ok_or(RepoError::CommentNotFound { log_id, comment_id })?;

        if comment.is_read {
            return Ok(ReadTransition::AlreadyRead);
        }
        comment.is_read = true;
        Ok(ReadTransition::MarkedRead)
    }
}
