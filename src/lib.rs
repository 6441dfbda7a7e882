//! Bookscout: the search-session core of a paginated book-search client.
//!
//! Bookscout owns the hard part of a search screen and nothing else:
//! - Generation-tagged search sessions that survive rapid re-querying
//! - Infinite-scroll page accumulation with size-based end-of-results detection
//! - Pull-to-refresh as a clean re-search, never a merge
//! - Optimistic favorite toggles with rollback and per-isbn superseding
//! - Pure view-model projection for the host UI to render
//!
//! # Architecture
//!
//! The crate follows a layered, event-driven architecture:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host UI (out of scope)                             │  ← renders view models,
//! └─────────────────────────────────────────────────────┘    forwards user intents
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← state machine
//! │  - Event handling                                   │  ← business logic
//! │  - Session state + generations                      │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Projection    │   │ Favorites     │   │ Transport     │
//! │ (ui/)         │   │ (favorites/)  │   │ (transport/)  │
//! │ - View models │   │ - Overlay     │   │ - Trait seam  │
//! │               │   │ - Rollback    │   │ - Tokio driver│
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Book / page models                               │
//! │  - End-of-results detection                         │
//! │  - Error types                                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Event loop contract
//!
//! All state lives on one logical event loop. User intents and transport
//! completions enter as [`Event`]s through [`handle_event`]; state mutations
//! are synchronous; side effects leave as [`Action`]s. The
//! [`TransportDriver`](transport::TransportDriver) executes transport actions
//! on tokio and posts completions back onto the loop's channel. Completions
//! apply in resolution order, not issue order — staleness is decided by
//! comparing the generation, ticket, or epoch each completion carries, never
//! by aborting calls.
//!
//! # Example
//!
//! ```rust
//! use bookscout::{handle_event, Event, SearchConfig, SearchSession};
//!
//! let mut session = SearchSession::new(SearchConfig::default());
//!
//! let (_, _actions) = handle_event(
//!     &mut session,
//!     &Event::SearchSubmitted { input: "dune".to_string() },
//! )?;
//! // Hand the actions to a transport::TransportDriver; its completions come
//! // back as events for this same loop.
//! assert_eq!(session.generation(), 1);
//! # Ok::<(), bookscout::BookscoutError>(())
//! ```
//!
//! # Modules
//!
//! - [`app`]: Session state machine with event/action model
//! - [`domain`]: Core domain types (books, pages, pagination, errors)
//! - [`favorites`]: Optimistic favorite overlay with rollback
//! - [`transport`]: Backend trait, tokio driver, in-memory catalog
//! - [`ui`]: View models consumed by the host renderer
//! - [`observability`]: Optional tracing subscriber setup
//!
//! # Key Design Decisions
//!
//! ## Generations over cancellation
//!
//! A new search does not abort in-flight requests; it increments a generation
//! counter and lets stale completions fail the tag comparison on arrival.
//! This keeps correctness independent of transport cancellation support and
//! of completion ordering.
//!
//! ## Size-based end-of-results
//!
//! The backend's "has more" signal is not trusted; a page shorter than
//! requested ends the set. A result count that is an exact multiple of the
//! page size costs one extra empty fetch, which is accepted.
//!
//! ## Favorites as a session-local overlay
//!
//! The search flow never reads favorite flags back from the server, so they
//! live in an overlay scoped to the current generation and are dropped — not
//! rolled back — when the result set they refer to is replaced.

pub mod app;
pub mod domain;
pub mod favorites;
pub mod observability;
pub mod transport;
pub mod ui;

pub use app::{handle_event, Action, DetailLookup, DetailStatus, Event, SearchSession, SessionStatus};
pub use domain::{Book, BookPage, BookscoutError, Result};
pub use favorites::FavoriteOverlay;
pub use transport::{BookTransport, InMemoryCatalog, TransportDriver};
pub use ui::{DetailViewModel, DisplayBook, SearchViewModel};

/// Page length requested from the backend when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Fetch configuration, fixed for a session's lifetime.
///
/// `page_size` controls request granularity and doubles as the
/// end-of-results threshold: a delivered page shorter than this is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Page length to request; also the end-of-results threshold.
    pub page_size: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchConfig {
    /// Creates a configuration with the given page size, clamped to at least
    /// one item per page.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }
}
