//! Error types for the bookscout search core.
//!
//! This module defines the centralized error type [`BookscoutError`] and a type
//! alias [`Result`] for convenient error handling throughout the crate. All
//! errors are implemented using the `thiserror` crate for automatic `Error`
//! trait implementation.
//!
//! The taxonomy is deliberately small. Every failure in this crate is
//! recoverable by a subsequent user action: an empty query is re-prompted, a
//! failed page fetch is retried by searching or refreshing again, and a failed
//! favorite mutation rolls back locally. Stale completions are not errors at
//! all; they are discarded silently by the event handler.

use thiserror::Error;

/// The main error type for bookscout operations.
///
/// Variants carry plain strings rather than source errors because failures
/// cross the transport boundary as data: completion events clone and store
/// them, and the view layer renders their messages. That is also why the enum
/// is `Clone` and `PartialEq`, unusual for error types but required here.
///
/// # Examples
///
/// ```
/// use bookscout::{BookscoutError, Result};
///
/// fn validate(term: &str) -> Result<()> {
///     if term.trim().is_empty() {
///         return Err(BookscoutError::EmptyQuery);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookscoutError {
    /// The submitted search term was empty after normalization.
    ///
    /// Recovered locally: the caller surfaces a prompt and session state is
    /// left untouched.
    #[error("search term is empty")]
    EmptyQuery,

    /// A transport or server failure during a page fetch or favorite mutation.
    ///
    /// For page fetches this puts the session into its error state until the
    /// user retriggers the search. For favorite mutations it only rolls back
    /// the one optimistic flag.
    #[error("network error: {0}")]
    Network(String),

    /// The transport driver could not deliver a completion.
    ///
    /// Occurs when the completion channel is closed while a fetch is still in
    /// flight, typically during host shutdown.
    #[error("transport error: {0}")]
    Transport(String),
}

/// A specialized `Result` type for bookscout operations.
///
/// Type alias for `std::result::Result<T, BookscoutError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, BookscoutError>;
