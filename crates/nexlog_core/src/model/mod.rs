//! Domain model for the activity-log timeline.
//!
//! # Responsibility
//! - Define canonical records (`Log`, `Comment`, `Person`) shared by every view.
//! - Own input validation rules for log submission and comment posting.
//!
//! # Invariants
//! - A log is anchored to one calendar day; its `date` never changes.
//! - Comments are append-only and only ever move from unread to read.

pub mod day;
pub mod log;
pub mod person;
