//! In-process catalog transport.
//!
//! [`InMemoryCatalog`] serves a fixed list of books through the
//! [`BookTransport`] interface with the same paging contract as the real
//! backend: case-insensitive substring search over title and author, 1-based
//! page slicing, and a total that reports the full match count. It exists for
//! tests and for hosts developing against the session core before wiring a
//! real client, and it can inject scripted failures to exercise error and
//! rollback paths.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Book, BookPage, BookscoutError, Result};
use crate::transport::BookTransport;

/// Pending scripted failures; each failing call consumes one.
#[derive(Debug, Default)]
struct FailureScript {
    remaining: u32,
    message: String,
}

/// Deterministic [`BookTransport`] over an in-memory book list.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    books: Vec<Book>,
    failures: Mutex<FailureScript>,
}

impl InMemoryCatalog {
    /// Creates a catalog serving `books`.
    #[must_use]
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books,
            failures: Mutex::new(FailureScript::default()),
        }
    }

    /// Creates a catalog from a JSON array of book records.
    ///
    /// # Errors
    ///
    /// Returns the underlying parse error when `json` is not a valid book
    /// array.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Scripts the next `count` transport calls to fail with `message`.
    ///
    /// Applies to all three operations; each failing call consumes one
    /// scripted failure, after which calls succeed again.
    pub fn fail_next(&self, count: u32, message: &str) {
        let mut script = self.failures.lock().expect("failure script poisoned");
        script.remaining = count;
        script.message = message.to_string();
    }

    /// Consumes one scripted failure if any remain.
    fn take_failure(&self) -> Option<BookscoutError> {
        let mut script = self.failures.lock().expect("failure script poisoned");
        if script.remaining == 0 {
            return None;
        }
        script.remaining -= 1;
        Some(BookscoutError::Network(script.message.clone()))
    }

    fn matches(&self, term: &str) -> Vec<&Book> {
        let needle = term.to_lowercase();
        self.books
            .iter()
            .filter(|book| {
                book.title.to_lowercase().contains(&needle)
                    || book.author.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[async_trait]
impl BookTransport for InMemoryCatalog {
    async fn fetch_page(&self, term: &str, page_number: u32, page_size: u32) -> Result<BookPage> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        let matches = self.matches(term);
        let start = (page_number.saturating_sub(1) as usize) * page_size as usize;
        let books: Vec<Book> = matches
            .iter()
            .skip(start)
            .take(page_size as usize)
            .map(|book| (*book).clone())
            .collect();

        tracing::trace!(
            term,
            page_number,
            delivered = books.len(),
            total = matches.len(),
            "catalog page served"
        );

        Ok(BookPage {
            books,
            page_number,
            requested_size: page_size,
            total: matches.len() as u32,
        })
    }

    async fn set_favorite(&self, _isbn: u64, desired: bool) -> Result<bool> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        Ok(desired)
    }

    async fn fetch_detail(&self, isbn: u64) -> Result<Book> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        self.books
            .iter()
            .find(|book| book.isbn == isbn)
            .cloned()
            .ok_or_else(|| BookscoutError::Network(format!("no book with isbn {isbn}")))
    }
}
