//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations and derived-view refreshes.
//! - Keep the presentation layer decoupled from index and store details.

pub mod thread_service;
pub mod timeline_service;
