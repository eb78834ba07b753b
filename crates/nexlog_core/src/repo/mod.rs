//! Entity store contracts and implementations.
//!
//! # Responsibility
//! - Own the canonical set of logs and their comment threads.
//! - Enforce record validation before any mutation.
//!
//! # Invariants
//! - Mutations are all-or-nothing: a failed call leaves the store unchanged.
//! - Repository APIs return semantic errors (`LogNotFound`, `CommentNotFound`)
//!   in addition to validation errors.

pub mod log_repo;
