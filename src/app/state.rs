//! Search session state container and view model computation.
//!
//! This module defines [`SearchSession`], the single owner of one screen's
//! search state: the current term, the generation counter, the fetched pages,
//! the fetch status, and the favorite overlay layered on top of the results.
//! It is the source of truth the event handler mutates and the view layer
//! projects from.
//!
//! # Architecture
//!
//! All state lives behind methods; nothing outside this type appends a page
//! or flips a status. The session is instantiated per screen or navigation
//! context — there is no process-wide singleton, and two screens hosting the
//! same search flow hold two independent sessions.
//!
//! # Generations
//!
//! Every accepted submission or refresh increments `generation` and tags the
//! page fetch it starts. A completion is applied only when its tag equals the
//! current generation; anything else is a stale leftover of an abandoned
//! search and is discarded without touching state. This is cooperative
//! cancellation: the underlying call is never aborted, its result is simply
//! ignored on arrival.

use crate::app::actions::Action;
use crate::app::status::SessionStatus;
use crate::domain::{is_last_page, Book, BookPage, BookscoutError, Result};
use crate::favorites::{FavoriteOverlay, Settlement};
use crate::ui::viewmodel::{DisplayBook, SearchViewModel};
use crate::SearchConfig;

/// One screen's search lifecycle: term, generation, pages, status, favorites.
///
/// Mutated by the event handler in response to user intents and transport
/// completions. View models are computed on demand from the current state.
#[derive(Debug, Clone)]
pub struct SearchSession {
    /// Page size and other fetch knobs, fixed for the session's lifetime.
    config: SearchConfig,

    /// Normalized term of the current generation. Empty until the first
    /// accepted submission.
    term: String,

    /// Strictly increasing search counter; 0 means "before the first search".
    /// The sole mechanism for invalidating stale in-flight fetches.
    generation: u64,

    /// Fetch status of the current generation.
    status: SessionStatus,

    /// Pages fetched for the current generation, contiguous from page 1.
    pages: Vec<BookPage>,

    /// Message of the most recent fetch failure, if the session is in its
    /// error state.
    error: Option<String>,

    /// Whether the last appended page was non-terminal.
    has_next_page: bool,

    /// Session-local favorite flags and their in-flight mutations.
    favorites: FavoriteOverlay,
}

impl SearchSession {
    /// Creates an idle session with no search submitted.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            term: String::new(),
            generation: 0,
            status: SessionStatus::Idle,
            pages: Vec::new(),
            error: None,
            has_next_page: false,
            favorites: FavoriteOverlay::new(),
        }
    }

    /// Normalized term of the current generation.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Current generation; 0 before the first accepted search.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current fetch status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Whether another page can be requested for the current generation.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// Number of pages fetched for the current generation.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The favorite overlay, for reads (e.g. by a detail screen sharing the
    /// session's favorites).
    #[must_use]
    pub fn favorites(&self) -> &FavoriteOverlay {
        &self.favorites
    }

    /// Flattened, page-order-preserving view of all fetched items.
    ///
    /// No cross-page dedup happens here: server-side pagination is trusted
    /// not to repeat an isbn within one generation. Deduplicating locally
    /// would mask a violated pagination contract rather than surface it.
    pub fn item_list(&self) -> impl Iterator<Item = &Book> {
        self.pages.iter().flat_map(|page| page.books.iter())
    }

    /// Backend-reported total as of the most recent page, if any page of the
    /// current generation has arrived.
    ///
    /// The total is trusted as reported, never recomputed from page lengths.
    #[must_use]
    pub fn total_count(&self) -> Option<u32> {
        self.pages.last().map(|page| page.total)
    }

    /// Starts a new search, abandoning whatever the session was doing.
    ///
    /// The raw input has newline characters stripped and surrounding
    /// whitespace trimmed; if nothing remains the submission is rejected with
    /// [`BookscoutError::EmptyQuery`] and no state changes. Otherwise the
    /// generation is bumped, pages and favorites are cleared, and the
    /// returned action fetches page 1 under the new generation. Any fetch
    /// still in flight from an earlier generation becomes a no-op on
    /// completion.
    pub fn start_search(&mut self, input: &str) -> Result<Action> {
        let term = input.replace('\n', "").trim().to_string();
        if term.is_empty() {
            tracing::debug!("empty search input rejected");
            return Err(BookscoutError::EmptyQuery);
        }

        self.generation += 1;
        self.term = term;
        self.pages.clear();
        self.error = None;
        self.has_next_page = false;
        self.status = SessionStatus::Loading;
        self.favorites.reset();

        tracing::debug!(
            term = %self.term,
            generation = self.generation,
            "search started"
        );

        Ok(Action::FetchPage {
            term: self.term.clone(),
            page_number: 1,
            page_size: self.config.page_size,
            generation: self.generation,
        })
    }

    /// Re-runs the current search from page 1 under a new generation.
    ///
    /// Pull-to-refresh semantics: old pages are dropped, never merged with
    /// fresh results. Equivalent to submitting the current term again, which
    /// also means refreshing before any search rejects with
    /// [`BookscoutError::EmptyQuery`].
    pub fn refresh(&mut self) -> Result<Action> {
        let term = self.term.clone();
        self.start_search(&term)
    }

    /// Requests the next page, if the session is in a position to want one.
    ///
    /// Returns `None` — and issues nothing — while a fetch is already in
    /// flight or when the last page was terminal. The infinite-scroll trigger
    /// may therefore fire as often as it likes; at most one next-page fetch
    /// is outstanding at a time.
    ///
    /// A session in its error state with more results available does issue a
    /// fetch: after a failed next-page fetch, scrolling again is the
    /// user-initiated retry.
    pub fn next_page_request(&mut self) -> Option<Action> {
        if self.status.is_fetching() {
            tracing::trace!("next page ignored, fetch already in flight");
            return None;
        }
        if !self.has_next_page {
            tracing::trace!("next page ignored, no further results");
            return None;
        }

        self.status = SessionStatus::LoadingMore;
        let page_number = self.pages.len() as u32 + 1;
        tracing::debug!(page_number, generation = self.generation, "next page requested");

        Some(Action::FetchPage {
            term: self.term.clone(),
            page_number,
            page_size: self.config.page_size,
            generation: self.generation,
        })
    }

    /// Applies a page-fetch completion. Returns true when state changed.
    ///
    /// Completions tagged with a non-current generation are discarded
    /// silently. A failed fetch moves the session to its error state and
    /// leaves fetched pages untouched. A successful page is appended,
    /// end-of-results is recomputed, and the session returns to `Loaded`.
    pub fn apply_page_fetched(
        &mut self,
        generation: u64,
        page_number: u32,
        outcome: Result<BookPage>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                stale_generation = generation,
                current_generation = self.generation,
                "stale page completion discarded"
            );
            return false;
        }

        match outcome {
            Err(error) => {
                tracing::debug!(%error, generation, "page fetch failed");
                self.error = Some(error.to_string());
                self.status = SessionStatus::Error;
                true
            }
            Ok(page) => {
                let expected = self.pages.len() as u32 + 1;
                if page.page_number != expected {
                    tracing::debug!(
                        got = page.page_number,
                        expected,
                        "non-contiguous page discarded"
                    );
                    return false;
                }

                self.has_next_page = !is_last_page(&page);
                tracing::debug!(
                    page_number = page.page_number,
                    items = page.len(),
                    total = page.total,
                    has_next_page = self.has_next_page,
                    "page appended"
                );
                self.pages.push(page);
                self.error = None;
                self.status = SessionStatus::Loaded;
                true
            }
        }
    }

    /// Flips a favorite optimistically and returns the remote mutation to run.
    pub fn toggle_favorite(&mut self, isbn: u64) -> Action {
        let receipt = self.favorites.toggle(isbn, self.generation);
        Action::SetFavorite {
            isbn,
            desired: receipt.desired,
            ticket: receipt.ticket,
            generation: self.generation,
        }
    }

    /// Applies a favorite-mutation completion.
    ///
    /// Returns whether visible state changed and, on rollback, the notice the
    /// host should surface. Completions from an older generation are dropped
    /// outright — the overlay they belonged to is gone.
    pub fn apply_favorite_settled(
        &mut self,
        isbn: u64,
        ticket: u64,
        generation: u64,
        outcome: &Result<bool>,
    ) -> (bool, Option<Action>) {
        if generation != self.generation {
            tracing::debug!(
                isbn,
                stale_generation = generation,
                current_generation = self.generation,
                "stale favorite settlement discarded"
            );
            return (false, None);
        }

        match self.favorites.settle(isbn, ticket, outcome.is_ok()) {
            Settlement::Committed => (false, None),
            Settlement::RolledBack { .. } => {
                let reason = match outcome {
                    Err(error) => error.to_string(),
                    Ok(_) => "mutation rejected".to_string(),
                };
                (
                    true,
                    Some(Action::ShowNotice {
                        message: format!("Could not update favorite: {reason}"),
                    }),
                )
            }
            Settlement::Superseded => (false, None),
        }
    }

    /// Computes the renderable state of the search screen.
    ///
    /// Pure derivation over the session and its favorite overlay; never
    /// mutates and never caches.
    #[must_use]
    pub fn compute_viewmodel(&self) -> SearchViewModel {
        if self.generation == 0 {
            return SearchViewModel::BeforeSearch;
        }

        match self.status {
            SessionStatus::Idle | SessionStatus::Loading => SearchViewModel::Searching,
            SessionStatus::Error => SearchViewModel::ResultsError {
                message: self.error.clone().unwrap_or_default(),
            },
            SessionStatus::Loaded | SessionStatus::LoadingMore => {
                let books: Vec<DisplayBook> = self
                    .item_list()
                    .map(|book| DisplayBook {
                        is_favorite: self.favorites.is_favorite(book.isbn),
                        book: book.clone(),
                    })
                    .collect();

                if books.is_empty() {
                    SearchViewModel::EmptyResults {
                        term: self.term.clone(),
                    }
                } else {
                    SearchViewModel::Results {
                        term: self.term.clone(),
                        total: self.total_count().unwrap_or(0),
                        books,
                        can_load_more: self.has_next_page,
                        is_loading_more: self.status == SessionStatus::LoadingMore,
                    }
                }
            }
        }
    }
}
