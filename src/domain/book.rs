//! Book domain model and page envelope.
//!
//! This module defines the core [`Book`] type as the search backend reports it
//! and [`BookPage`], the envelope for one fetched page of results. Both are
//! wire-shaped: they derive serde traits because they mirror the backend's
//! JSON payloads, and they stay immutable once fetched. The favorite flag is
//! deliberately absent here — it is session-local UI state layered on top by
//! [`crate::favorites::FavoriteOverlay`], never server truth.

use serde::{Deserialize, Serialize};

/// A single book as returned by the search backend.
///
/// `isbn` is the unique key within a result set; everything else is display
/// data. Fields mirror the backend's search and detail payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier within a result set.
    pub isbn: u64,

    /// Title as reported by the backend.
    pub title: String,

    /// Author display string (may contain multiple names).
    pub author: String,

    /// Cover image URL. Loading it is the host's concern.
    #[serde(default)]
    pub image: String,

    /// Plot or content summary.
    #[serde(default)]
    pub description: String,

    /// Publisher display string.
    #[serde(default)]
    pub publisher: String,
}

/// One fetched page of search results plus its pagination metadata.
///
/// `books` preserves backend order. `page_number` is 1-based. `requested_size`
/// is the page length the client asked for, recorded at fetch time because
/// end-of-results detection compares against it, not against whatever the
/// session's configuration says later. `total` is the backend's report of the
/// full result count as of this page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPage {
    /// Books on this page, in backend order.
    pub books: Vec<Book>,

    /// 1-based page index this envelope answers.
    pub page_number: u32,

    /// Page length requested from the backend.
    pub requested_size: u32,

    /// Total matching results reported by the backend.
    pub total: u32,
}

impl BookPage {
    /// Number of books on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// True when the page carries no books.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
