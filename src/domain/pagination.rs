//! End-of-results detection.
//!
//! The backend does not reliably report a "has more" flag, so termination is
//! decided client-side from page length: any page shorter than what was
//! requested is treated as the last one. The heuristic is conservative on
//! purpose — a result set whose size is an exact multiple of the page size
//! costs one extra fetch that returns an empty terminal page. That degraded
//! case is accepted behavior, not something to paper over with server trust.

use crate::domain::BookPage;

/// Returns true when `page` is the final page of its result set.
///
/// A page shorter than its requested size means the backend ran out of
/// results. A full page says nothing either way and is treated as
/// non-terminal.
///
/// # Examples
///
/// ```
/// use bookscout::domain::{is_last_page, BookPage};
///
/// let page = BookPage { books: vec![], page_number: 3, requested_size: 20, total: 45 };
/// assert!(is_last_page(&page));
/// ```
#[must_use]
pub fn is_last_page(page: &BookPage) -> bool {
    (page.len() as u32) < page.requested_size
}

/// Returns the page number to request next, or `None` when `last` is terminal.
///
/// `fetched_pages` is how many pages the session holds once `last` is
/// appended; page numbers are 1-based, so the next request is
/// `fetched_pages + 1`.
#[must_use]
pub fn next_page_number(last: &BookPage, fetched_pages: usize) -> Option<u32> {
    if is_last_page(last) {
        None
    } else {
        Some(fetched_pages as u32 + 1)
    }
}
