//! View model types representing renderable screen state.
//!
//! This module defines the immutable view models computed from session state.
//! They are pure derivations: computing one never mutates the session, and
//! the host re-computes after every handled event. The view models contain no
//! business logic, only display-ready data — which of the screen's mutually
//! exclusive states to show, and the rows to render in the loaded case.

use crate::domain::Book;

/// Renderable state of the search screen.
///
/// Exactly one variant applies at a time, mirroring the screen's early-return
/// ladder: before any search, while the first page loads, on fetch failure,
/// on an empty result set, or with results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchViewModel {
    /// No search submitted yet; only the search header is shown.
    BeforeSearch,

    /// The first page of the current search is in flight.
    Searching,

    /// The most recent fetch failed.
    ResultsError {
        /// Message to display, taken from the stored fetch error.
        message: String,
    },

    /// The search completed and matched nothing.
    EmptyResults {
        /// The term that produced no results.
        term: String,
    },

    /// At least one page of results is available.
    Results {
        /// The term being displayed, for the result header.
        term: String,
        /// Backend-reported total as of the most recent page.
        total: u32,
        /// Flattened rows across all fetched pages, in page order.
        books: Vec<DisplayBook>,
        /// True when another page can be requested.
        can_load_more: bool,
        /// True while a follow-up page is in flight (tail spinner).
        is_loading_more: bool,
    },
}

/// Renderable state of the book detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailViewModel {
    /// The detail record is in flight (or not yet requested).
    Loading,

    /// The detail fetch failed.
    Error {
        /// Message to display.
        message: String,
    },

    /// The detail record is available.
    Loaded {
        /// The book plus its session-local favorite flag.
        book: DisplayBook,
    },
}

/// One result row: the fetched book plus its session-local favorite flag.
///
/// The flag comes from the favorite overlay, not from the book record — the
/// backend never reports favorites back in this flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBook {
    /// The immutable fetched record.
    pub book: Book,

    /// Visible favorite flag, including any optimistic override.
    pub is_favorite: bool,
}
