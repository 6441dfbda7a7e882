//! Transport abstraction.
//!
//! This module defines the [`BookTransport`] trait that abstracts over the
//! backend the search flow talks to. The trait is the crate's only I/O seam:
//! everything above it is synchronous state machinery, everything below it is
//! the host's HTTP client (or an in-process stand-in).
//!
//! # Design Philosophy
//!
//! The trait is minimal and use-case-shaped, not a generic API client. Each
//! method maps to one operation the session core actually performs, and each
//! call resolves to exactly one completion event. Retry policy deliberately
//! does not live here or in the core: a failed fetch surfaces as session
//! error state and the user retriggers.

use async_trait::async_trait;

use crate::domain::{Book, BookPage, Result};

/// Abstraction over the remote book backend.
///
/// Implementations must be cheap to share (`Send + Sync`); the driver holds
/// one behind an `Arc` and clones the handle into each spawned call.
///
/// # Implementations
///
/// - [`InMemoryCatalog`](crate::transport::InMemoryCatalog): deterministic
///   in-process catalog for tests and host development
#[async_trait]
pub trait BookTransport: Send + Sync {
    /// Fetches one page of search results for `term`.
    ///
    /// `page_number` is 1-based. The returned envelope must echo
    /// `page_number` and `page_size` so end-of-results detection can compare
    /// delivered against requested length.
    ///
    /// # Errors
    ///
    /// Returns [`BookscoutError::Network`](crate::BookscoutError::Network) on
    /// transport or server failure.
    async fn fetch_page(&self, term: &str, page_number: u32, page_size: u32) -> Result<BookPage>;

    /// Persists a favorite flag remotely, returning the committed value.
    ///
    /// # Errors
    ///
    /// Returns [`BookscoutError::Network`](crate::BookscoutError::Network) on
    /// transport or server failure; the caller rolls the optimistic flag
    /// back.
    async fn set_favorite(&self, isbn: u64, desired: bool) -> Result<bool>;

    /// Fetches the detail record for one book.
    ///
    /// # Errors
    ///
    /// Returns [`BookscoutError::Network`](crate::BookscoutError::Network) on
    /// transport or server failure, including an unknown isbn.
    async fn fetch_detail(&self, isbn: u64) -> Result<Book>;
}
