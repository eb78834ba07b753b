//! Comment thread use-cases.
//!
//! # Responsibility
//! - Post comments through the entity store.
//! - Apply read transitions and compute unread counts per viewer role.
//!
//! # Invariants
//! - Comment state only moves `Unread -> Read`; marking twice is a no-op.
//! - A viewer never counts comments written by their own role.

use crate::model::log::{Comment, CommentAuthor, CommentId, Log, LogId};
use crate::model::person::Role;
use crate::repo::log_repo::{LogRepository, ReadTransition, RepoError, RepoResult};
use log::debug;

/// Thread operations over a borrowed entity store.
pub struct ThreadService<'r, R: LogRepository> {
    repo: &'r mut R,
}

impl<'r, R: LogRepository> ThreadService<'r, R> {
    pub fn new(repo: &'r mut R) -> Self {
        Self { repo }
    }

    /// Appends a comment to `log_id`.
    ///
    /// Comments written by the log owner's role start read.
    pub fn post_comment(
        &mut self,
        log_id: LogId,
        author: CommentAuthor,
        content: &str,
    ) -> RepoResult<Comment> {
        self.repo.append_comment(log_id, author, content)
    }

    /// Marks one comment read. Idempotent.
    pub fn mark_read(
        &mut self,
        log_id: LogId,
        comment_id: CommentId,
    ) -> RepoResult<ReadTransition> {
        let transition = self.repo.mark_comment_read(log_id, comment_id)?;
        debug!(
            "event=comment_mark_read module=thread log_id={} comment_id={} transition={:?}",
            log_id, comment_id, transition
        );
        Ok(transition)
    }

    /// Marks every comment `viewer` still sees as new on one log.
    ///
    /// Returns how many comments changed state.
    pub fn mark_thread_read(&mut self, log_id: LogId, viewer: Role) -> RepoResult<usize> {
        let pending: Vec<CommentId> = self
            .repo
            .get_log(log_id)
            .ok_or(RepoError::LogNotFound(log_id))?
            .comments
            .iter()
            .filter(|comment| comment.is_new_for(viewer))
            .map(|comment| comment.id)
            .collect();

        let mut changed = 0;
        for comment_id in pending {
            if self.repo.mark_comment_read(log_id, comment_id)? == ReadTransition::MarkedRead {
                changed += 1;
            }
        }
        Ok(changed)
    }
}

/// Unread comments on `log` addressed to `viewer`.
pub fn unread_count_for(log: &Log, viewer: Role) -> usize {
    log.unread_count_for(viewer)
}

/// Unread comments addressed to `viewer` across `logs`.
pub fn total_unread(logs: &[Log], viewer: Role) -> usize {
    logs.iter().map(|log| unread_count_for(log, viewer)).sum()
}
