//! Pagination within one day group.
//!
//! # Invariants
//! - Page numbers are 1-indexed and clamped into `[1, total_pages]`.
//! - Asking past the end yields the last page, never an error.
//! - A zero page size is a validation error.

use crate::model::log::ValidationError;
use serde::Serialize;

/// One page of items plus navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Effective page number after clamping.
    pub page_number: usize,
    /// `0` when there are no items at all.
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Slices `items` into the requested page.
///
/// # Errors
/// - `ValidationError::InvalidPageSize` when `page_size == 0`.
pub fn paginate<T: Clone>(
    items: &[T],
    page_size: usize,
    page_number: usize,
) -> Result<Page<T>, ValidationError> {
    if page_size == 0 {
        return Err(ValidationError::InvalidPageSize);
    }

    let total_pages = items.len().div_ceil(page_size);
    let page_number = page_number.clamp(1, total_pages.max(1));
    let start = (page_number - 1) * page_size;
    let end = (start + page_size).min(items.len());

    Ok(Page {
        items: items[start.min(end)..end].to_vec(),
        page_number,
        total_pages,
        has_previous: page_number > 1,
        has_next: page_number < total_pages,
    })
}
