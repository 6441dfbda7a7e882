//! Single-book detail lookup.
//!
//! The detail screen fetches one record by isbn and renders loading, error,
//! or the book. It is a separate navigation context from the result list, so
//! it carries its own staleness tag — an epoch counter bumped per request —
//! instead of the search generation. The discipline is the same: a completion
//! is applied only when its tag is current; re-requesting while a fetch is in
//! flight supersedes it cooperatively.

use crate::app::actions::Action;
use crate::domain::{Book, Result};
use crate::favorites::FavoriteOverlay;
use crate::ui::viewmodel::{DetailViewModel, DisplayBook};

/// Fetch status of the detail lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailStatus {
    /// Nothing requested yet.
    #[default]
    Idle,

    /// A detail fetch is in flight.
    Loading,

    /// The record arrived.
    Loaded(Book),

    /// The fetch failed; retried by requesting again.
    Error(String),
}

/// State of one detail screen's record fetch.
#[derive(Debug, Clone, Default)]
pub struct DetailLookup {
    epoch: u64,
    status: DetailStatus,
}

impl DetailLookup {
    /// Creates an idle lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> &DetailStatus {
        &self.status
    }

    /// Starts (or restarts) the fetch for `isbn`.
    ///
    /// Bumps the epoch so that any earlier in-flight fetch is abandoned on
    /// arrival, and returns the action the driver should execute.
    pub fn request(&mut self, isbn: u64) -> Action {
        self.epoch += 1;
        self.status = DetailStatus::Loading;
        tracing::debug!(isbn, epoch = self.epoch, "detail requested");
        Action::FetchDetail {
            isbn,
            epoch: self.epoch,
        }
    }

    /// Applies a detail completion. Returns true when state changed.
    ///
    /// Completions tagged with a non-current epoch are discarded silently.
    pub fn settle(&mut self, epoch: u64, outcome: Result<Book>) -> bool {
        if epoch != self.epoch {
            tracing::debug!(
                stale_epoch = epoch,
                current_epoch = self.epoch,
                "stale detail completion discarded"
            );
            return false;
        }

        self.status = match outcome {
            Ok(book) => DetailStatus::Loaded(book),
            Err(error) => DetailStatus::Error(error.to_string()),
        };
        true
    }

    /// Computes the renderable state of the detail screen.
    ///
    /// `favorites` is the owning session's overlay, so the detail screen
    /// shows the same optimistic flag as the list it was opened from. `Idle`
    /// renders as loading: a detail screen requests on mount.
    #[must_use]
    pub fn compute_viewmodel(&self, favorites: &FavoriteOverlay) -> DetailViewModel {
        match &self.status {
            DetailStatus::Idle | DetailStatus::Loading => DetailViewModel::Loading,
            DetailStatus::Error(message) => DetailViewModel::Error {
                message: message.clone(),
            },
            DetailStatus::Loaded(book) => DetailViewModel::Loaded {
                book: DisplayBook {
                    is_favorite: favorites.is_favorite(book.isbn),
                    book: book.clone(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookscoutError;

    fn book(isbn: u64) -> Book {
        Book {
            isbn,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            image: String::new(),
            description: "Spice.".to_string(),
            publisher: "Chilton".to_string(),
        }
    }

    #[test]
    fn request_then_settle_loads_the_record() {
        let mut lookup = DetailLookup::new();
        let action = lookup.request(42);
        assert_eq!(action, Action::FetchDetail { isbn: 42, epoch: 1 });

        assert!(lookup.settle(1, Ok(book(42))));
        assert!(matches!(lookup.status(), DetailStatus::Loaded(_)));
    }

    #[test]
    fn re_request_supersedes_the_in_flight_fetch() {
        let mut lookup = DetailLookup::new();
        lookup.request(42);
        lookup.request(43);

        assert!(!lookup.settle(1, Ok(book(42))));
        assert_eq!(lookup.status(), &DetailStatus::Loading);

        assert!(lookup.settle(2, Ok(book(43))));
        let DetailStatus::Loaded(loaded) = lookup.status() else {
            panic!("expected Loaded");
        };
        assert_eq!(loaded.isbn, 43);
    }

    #[test]
    fn failure_renders_as_error_and_retry_works() {
        let mut lookup = DetailLookup::new();
        lookup.request(42);
        lookup.settle(1, Err(BookscoutError::Network("down".to_string())));
        assert_eq!(
            lookup.compute_viewmodel(&FavoriteOverlay::new()),
            DetailViewModel::Error {
                message: "network error: down".to_string()
            }
        );

        lookup.request(42);
        assert_eq!(
            lookup.compute_viewmodel(&FavoriteOverlay::new()),
            DetailViewModel::Loading
        );
    }

    #[test]
    fn viewmodel_reads_the_shared_favorite_flag() {
        let mut lookup = DetailLookup::new();
        lookup.request(42);
        lookup.settle(1, Ok(book(42)));

        let mut favorites = FavoriteOverlay::new();
        favorites.toggle(42, 1);

        let DetailViewModel::Loaded { book } = lookup.compute_viewmodel(&favorites) else {
            panic!("expected Loaded");
        };
        assert!(book.is_favorite);
    }
}
