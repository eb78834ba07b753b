//! Query and navigation over the date index.
//!
//! # Responsibility
//! - Autocomplete people by name.
//! - Resolve date jumps to existing day groups.
//! - Page through the logs of one day.

pub mod jump;
pub mod page;
pub mod search;
