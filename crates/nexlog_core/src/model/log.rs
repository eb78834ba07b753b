//! Log and comment records.
//!
//! # Responsibility
//! - Define the dated activity record and its comment thread.
//! - Validate submission input before anything reaches the store.
//!
//! # Invariants
//! - `Log::date` is a whole calendar day and is fixed at creation.
//! - Comment ids are unique within their log and strictly increasing.
//! - `Comment::is_read` only transitions `false -> true`.

use super::day::DayKey;
use super::person::{Person, PersonId, Role};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("valid link regex"));

/// Stable identifier of a log within the store.
pub type LogId = u64;

/// Identifier of a comment, scoped to its parent log.
pub type CommentId = u64;

/// Malformed caller input. Always recoverable and never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Log content is empty after trimming.
    EmptyContent,
    /// Comment content is empty after trimming.
    EmptyComment,
    /// Date text is not a real calendar day.
    InvalidDate(String),
    /// Link is present but not an absolute http(s) URI.
    InvalidLink(String),
    /// Page size must be positive.
    InvalidPageSize,
    /// Load batch size must be positive.
    InvalidBatchSize,
    /// Author id is not present in the person directory.
    UnknownAuthor(PersonId),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "log content must not be empty"),
            Self::EmptyComment => write!(f, "comment content must not be empty"),
            Self::InvalidDate(value) => write!(f, "invalid calendar day `{value}`"),
            Self::InvalidLink(value) => write!(f, "invalid link `{value}`"),
            Self::InvalidPageSize => write!(f, "page size must be greater than zero"),
            Self::InvalidBatchSize => write!(f, "batch size must be greater than zero"),
            Self::UnknownAuthor(id) => write!(f, "unknown author: {id}"),
        }
    }
}

impl Error for ValidationError {}

/// Who wrote a comment: a named person or a bare role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub name: String,
    pub role: Role,
}

impl CommentAuthor {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    /// Author identified only by role, labelled with the role name.
    pub fn from_role(role: Role) -> Self {
        Self::new(role.label(), role)
    }
}

impl From<&Person> for CommentAuthor {
    fn from(value: &Person) -> Self {
        Self::new(value.name.clone(), value.role)
    }
}

/// One reply in a log's thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: CommentAuthor,
    pub content: String,
    pub is_read: bool,
}

impl Comment {
    /// Whether this comment still needs the viewer's attention.
    ///
    /// A viewer never owes attention to comments written by their own role.
    pub fn is_new_for(&self, viewer: Role) -> bool {
        !self.is_read && self.author.role != viewer
    }
}

/// A dated activity record with its comment thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub id: LogId,
    pub date: DayKey,
    pub author_id: PersonId,
    /// Role of the owning author, captured at submission.
    pub author_role: Role,
    pub content: String,
    pub link: Option<String>,
    pub comments: Vec<Comment>,
}

impl Log {
    /// Number of comments `viewer` has not read yet.
    pub fn unread_count_for(&self, viewer: Role) -> usize {
        self.comments
            .iter()
            .filter(|comment| comment.is_new_for(viewer))
            .count()
    }

    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|comment| comment.id == id)
    }

    /// Next comment id; ids follow insertion order and are never reused.
    pub(crate) fn next_comment_id(&self) -> CommentId {
        self.comments.last().map_or(1, |comment| comment.id + 1)
    }
}

/// Submission payload for a new log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLogEntry {
    pub author_id: PersonId,
    pub author_role: Role,
    pub date: DayKey,
    pub content: String,
    pub link: Option<String>,
}

impl NewLogEntry {
    pub fn new(
        author: &Person,
        date: DayKey,
        content: impl Into<String>,
        link: Option<String>,
    ) -> Self {
        Self {
            author_id: author.id,
            author_role: author.role,
            date,
            content: content.into(),
            link,
        }
    }

    /// Checks content and link rules.
    ///
    /// # Errors
    /// - `EmptyContent` when content is blank.
    /// - `InvalidLink` when a non-blank link is not an absolute http(s) URI.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        normalize_link(self.link.as_deref())?;
        Ok(())
    }
}

/// Blank links are treated as absent; anything else must look like a web URI.
pub fn normalize_link(link: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(raw) = link else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if !LINK_RE.is_match(trimmed) {
        return Err(ValidationError::InvalidLink(trimmed.to_string()));
    }
    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn teacher() -> Person {
        Person::new(1, "John Doe", Role::Teacher)
    }

    fn day() -> DayKey {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn blank_content_is_rejected() {
        let entry = NewLogEntry::new(&teacher(), day(), "   \n", None);
        assert_eq!(entry.validate(), Err(ValidationError::EmptyContent));
    }

    #[test]
    fn blank_link_normalizes_to_none() {
        assert_eq!(normalize_link(Some("  ")), Ok(None));
        assert_eq!(normalize_link(None), Ok(None));
    }

    #[test]
    fn link_must_be_absolute_web_uri() {
        assert_eq!(
            normalize_link(Some(" https://example.com/a?b=1 ")),
            Ok(Some("https://example.com/a?b=1".to_string()))
        );
        assert!(matches!(
            normalize_link(Some("example.com")),
            Err(ValidationError::InvalidLink(_))
        ));
    }

    #[test]
    fn own_role_comments_are_never_new() {
        let comment = Comment {
            id: 1,
            author: CommentAuthor::from_role(Role::Teacher),
            content: "note".to_string(),
            is_read: false,
        };
        assert!(!comment.is_new_for(Role::Teacher));
        assert!(comment.is_new_for(Role::Admin));
    }

    #[test]
    fn serializes_role_in_snake_case() {
        let author = CommentAuthor::from_role(Role::Admin);
        let json = serde_json::to_string(&author).unwrap();
        assert_eq!(json, r#"{"name":"Admin","role":"admin"}"#);
    }
}
